use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Pharmacy;

const PHARMACY_SELECT: &str = "SELECT id, name, address, phone, open_time, close_time, pharmacist_id,
     latitude, longitude
     FROM pharmacies";

/// Pharmacies owned by one pharmacist account.
pub fn list_for_pharmacist(
    conn: &Connection,
    pharmacist_id: i64,
) -> Result<Vec<Pharmacy>, DatabaseError> {
    let sql = format!("{PHARMACY_SELECT} WHERE pharmacist_id = ?1 ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pharmacist_id], pharmacy_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

#[allow(clippy::too_many_arguments)]
pub fn insert_pharmacy(
    conn: &Connection,
    name: &str,
    address: &str,
    phone: &str,
    open_time: &str,
    close_time: &str,
    pharmacist_id: i64,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO pharmacies
         (name, address, phone, open_time, close_time, pharmacist_id, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![name, address, phone, open_time, close_time, pharmacist_id, latitude, longitude],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete a pharmacy; stock rows cascade. Returns whether a row existed.
pub fn delete_pharmacy(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM pharmacies WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Total registered pharmacies, shown as the dashboard's nearby count.
pub fn count_pharmacies(conn: &Connection) -> Result<i64, DatabaseError> {
    conn.query_row("SELECT COUNT(*) FROM pharmacies", [], |row| row.get(0))
        .map_err(DatabaseError::from)
}

fn pharmacy_from_row(row: &rusqlite::Row<'_>) -> Result<Pharmacy, rusqlite::Error> {
    Ok(Pharmacy {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        open_time: row.get(4)?,
        close_time: row.get(5)?,
        pharmacist_id: row.get(6)?,
        latitude: row.get(7)?,
        longitude: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::user::insert_user;
    use crate::models::enums::AccountType;

    fn seed_pharmacist(conn: &Connection) -> i64 {
        insert_user(conn, Some("ph@x.com"), None, AccountType::Pharmacist).unwrap()
    }

    #[test]
    fn insert_and_list_by_owner() {
        let conn = open_memory_database().unwrap();
        let owner = seed_pharmacist(&conn);
        let other = insert_user(&conn, Some("ph2@x.com"), None, AccountType::Pharmacist).unwrap();

        insert_pharmacy(&conn, "Central", "1 Main St", "555", "08:00", "20:00", owner, None, None)
            .unwrap();
        insert_pharmacy(&conn, "North", "2 High St", "556", "09:00", "19:00", other, None, None)
            .unwrap();

        let owned = list_for_pharmacist(&conn, owner).unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].name, "Central");
        assert_eq!(owned[0].open_time, "08:00");
    }

    #[test]
    fn delete_reports_row_existence() {
        let conn = open_memory_database().unwrap();
        let owner = seed_pharmacist(&conn);
        let id =
            insert_pharmacy(&conn, "Central", "", "", "08:00", "20:00", owner, None, None).unwrap();

        assert!(delete_pharmacy(&conn, id).unwrap());
        assert!(!delete_pharmacy(&conn, id).unwrap());
    }

    #[test]
    fn coordinates_stored_when_present() {
        let conn = open_memory_database().unwrap();
        let owner = seed_pharmacist(&conn);
        insert_pharmacy(
            &conn,
            "Geo",
            "",
            "",
            "08:00",
            "20:00",
            owner,
            Some(48.85),
            Some(2.35),
        )
        .unwrap();

        let all = list_for_pharmacist(&conn, owner).unwrap();
        assert_eq!(all[0].latitude, Some(48.85));
        assert_eq!(all[0].longitude, Some(2.35));
    }
}
