use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Medication;

/// Filters for the catalog listing.
#[derive(Debug, Clone, Default)]
pub struct MedicationFilter {
    /// Substring match on name or description.
    pub search: Option<String>,
    /// Only entries added in the current calendar month.
    pub added_this_month: bool,
}

const MEDICATION_SELECT: &str = "SELECT id, name, description, photo_url, price, usage_type,
     dietary_precautions, administration_mode, meal_timing, added_at
     FROM medications";

/// List catalog entries, alphabetically, applying the optional filters.
pub fn list_medications(
    conn: &Connection,
    filter: &MedicationFilter,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut sql = MEDICATION_SELECT.to_string();
    let mut clauses: Vec<&str> = Vec::new();
    let mut bind: Vec<String> = Vec::new();

    if filter.added_this_month {
        clauses.push(
            "strftime('%m', added_at) = strftime('%m', 'now')
             AND strftime('%Y', added_at) = strftime('%Y', 'now')",
        );
    }
    if let Some(q) = filter.search.as_deref().filter(|q| !q.is_empty()) {
        clauses.push("(name LIKE ?1 OR description LIKE ?1)");
        bind.push(format!("%{q}%"));
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(bind.iter()), medication_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Register a full catalog entry. Fails with a UNIQUE violation when the
/// name (case-insensitively) already exists; callers map that to a 409.
pub fn insert_medication(
    conn: &Connection,
    name: &str,
    description: &str,
    photo_url: &str,
    price: &str,
    usage_type: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medications (name, description, photo_url, price, usage_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, description, photo_url, price, usage_type],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Case-insensitive catalog lookup by name.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, DatabaseError> {
    conn.query_row(
        "SELECT id FROM medications WHERE name = ?1 COLLATE NOCASE",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Resolve a name to a catalog id, creating a bare-name stub when the
/// catalog does not know the medication yet. Prescriptions reference
/// medications through here.
pub fn find_or_create_by_name(conn: &Connection, name: &str) -> Result<i64, DatabaseError> {
    if let Some(id) = find_by_name(conn, name)? {
        return Ok(id);
    }
    conn.execute("INSERT INTO medications (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

fn medication_from_row(row: &rusqlite::Row<'_>) -> Result<Medication, rusqlite::Error> {
    Ok(Medication {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        photo_url: row.get(3)?,
        price: row.get(4)?,
        usage_type: row.get(5)?,
        dietary_precautions: row.get(6)?,
        administration_mode: row.get(7)?,
        meal_timing: row.get(8)?,
        added_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn insert_then_list_alphabetical() {
        let conn = open_memory_database().unwrap();
        insert_medication(&conn, "Ibuprofen", "NSAID", "", "4.20", "tablet").unwrap();
        insert_medication(&conn, "Aspirin", "Salicylate", "", "2.10", "tablet").unwrap();

        let all = list_medications(&conn, &MedicationFilter::default()).unwrap();
        let names: Vec<&str> = all.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Aspirin", "Ibuprofen"]);
    }

    #[test]
    fn search_matches_name_and_description() {
        let conn = open_memory_database().unwrap();
        insert_medication(&conn, "Aspirin", "pain relief", "", "", "tablet").unwrap();
        insert_medication(&conn, "Loratadine", "antihistamine", "", "", "tablet").unwrap();

        let filter = MedicationFilter {
            search: Some("pain".into()),
            added_this_month: false,
        };
        let hits = list_medications(&conn, &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Aspirin");
    }

    #[test]
    fn added_this_month_includes_fresh_rows() {
        let conn = open_memory_database().unwrap();
        insert_medication(&conn, "Aspirin", "", "", "", "tablet").unwrap();
        conn.execute(
            "UPDATE medications SET added_at = datetime('now', '-2 months') WHERE name = 'Aspirin'",
            [],
        )
        .unwrap();
        insert_medication(&conn, "Ibuprofen", "", "", "", "tablet").unwrap();

        let filter = MedicationFilter {
            search: None,
            added_this_month: true,
        };
        let fresh = list_medications(&conn, &filter).unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Ibuprofen");
    }

    #[test]
    fn duplicate_name_rejected_case_insensitively() {
        let conn = open_memory_database().unwrap();
        insert_medication(&conn, "Aspirin", "", "", "", "tablet").unwrap();
        let err = insert_medication(&conn, "ASPIRIN", "", "", "", "tablet").unwrap_err();
        assert!(crate::db::is_unique_violation(&err));
    }

    #[test]
    fn find_or_create_reuses_existing_row() {
        let conn = open_memory_database().unwrap();
        let first = find_or_create_by_name(&conn, "Doliprane").unwrap();
        let second = find_or_create_by_name(&conn, "doliprane").unwrap();
        assert_eq!(first, second);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM medications", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
