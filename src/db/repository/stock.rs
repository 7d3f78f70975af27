use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{StockLine, StockedPharmacy};

/// Stock rows of one pharmacy, joined with medication names.
pub fn stock_for_pharmacy(
    conn: &Connection,
    pharmacy_id: i64,
) -> Result<Vec<StockLine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT s.id, m.id, m.name, s.quantity
         FROM pharmacy_stock s
         JOIN medications m ON s.medication_id = m.id
         WHERE s.pharmacy_id = ?1
         ORDER BY m.name",
    )?;

    let rows = stmt.query_map(params![pharmacy_id], |row| {
        Ok(StockLine {
            id: row.get(0)?,
            medication_id: row.get(1)?,
            medication_name: row.get(2)?,
            quantity: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Set the quantity of one (pharmacy, medication) pair.
///
/// Idempotent upsert: repeated calls with the same quantity leave
/// exactly one row. Last write wins under concurrent updates.
pub fn upsert_stock(
    conn: &Connection,
    pharmacy_id: i64,
    medication_id: i64,
    quantity: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO pharmacy_stock (pharmacy_id, medication_id, quantity)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(pharmacy_id, medication_id) DO UPDATE SET quantity = excluded.quantity",
        params![pharmacy_id, medication_id, quantity],
    )?;
    Ok(())
}

/// Pharmacies holding positive stock of a medication, with coordinates
/// for distance ranking.
pub fn pharmacies_with_stock(
    conn: &Connection,
    medication_id: i64,
) -> Result<Vec<StockedPharmacy>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.address, p.phone, p.latitude, p.longitude, s.quantity
         FROM pharmacies p
         JOIN pharmacy_stock s ON p.id = s.pharmacy_id
         WHERE s.medication_id = ?1 AND s.quantity > 0",
    )?;

    let rows = stmt.query_map(params![medication_id], |row| {
        Ok(StockedPharmacy {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            phone: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            quantity: row.get(6)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
