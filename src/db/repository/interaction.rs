use std::str::FromStr;

use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::enums::RiskLevel;
use crate::models::InteractionDetail;

/// List interactions joined with both medication names.
pub fn list_interactions(conn: &Connection) -> Result<Vec<InteractionDetail>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT i.id, s.name, r.name, i.risk_level, i.description
         FROM medication_interactions i
         JOIN medications s ON i.source_medication_id = s.id
         JOIN medications r ON i.restricted_medication_id = r.id
         ORDER BY i.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut interactions = Vec::new();
    for row in rows {
        let (id, source_name, restricted_name, risk, description) = row?;
        interactions.push(InteractionDetail {
            id,
            source_name,
            restricted_name,
            risk_level: RiskLevel::from_str(&risk)?,
            description,
        });
    }
    Ok(interactions)
}

/// Record an interaction pair. The pair is stored as given; the reversed
/// pair is a distinct row.
pub fn insert_interaction(
    conn: &Connection,
    source_medication_id: i64,
    restricted_medication_id: i64,
    risk_level: RiskLevel,
    description: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medication_interactions
         (source_medication_id, restricted_medication_id, risk_level, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            source_medication_id,
            restricted_medication_id,
            risk_level.as_str(),
            description,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::medication::insert_medication;

    fn seed_meds(conn: &Connection) -> (i64, i64) {
        let a = insert_medication(conn, "Warfarin", "", "", "", "tablet").unwrap();
        let b = insert_medication(conn, "Aspirin", "", "", "", "tablet").unwrap();
        (a, b)
    }

    #[test]
    fn insert_and_list_with_names() {
        let conn = open_memory_database().unwrap();
        let (a, b) = seed_meds(&conn);
        insert_interaction(&conn, a, b, RiskLevel::High, "Bleeding risk").unwrap();

        let all = list_interactions(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].source_name, "Warfarin");
        assert_eq!(all[0].restricted_name, "Aspirin");
        assert_eq!(all[0].risk_level, RiskLevel::High);
    }

    #[test]
    fn reversed_pair_is_a_distinct_row() {
        let conn = open_memory_database().unwrap();
        let (a, b) = seed_meds(&conn);
        insert_interaction(&conn, a, b, RiskLevel::Moderate, "").unwrap();
        insert_interaction(&conn, b, a, RiskLevel::Moderate, "").unwrap();

        assert_eq!(list_interactions(&conn).unwrap().len(), 2);
    }

    #[test]
    fn unknown_medication_rejected() {
        let conn = open_memory_database().unwrap();
        let (a, _) = seed_meds(&conn);
        let result = insert_interaction(&conn, a, 999, RiskLevel::Low, "");
        assert!(result.is_err());
    }
}
