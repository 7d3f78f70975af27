use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::Frequency;
use crate::models::{DoseEvent, Prescription, PrescriptionItem, UpcomingDose};

pub fn insert_prescription(
    conn: &Connection,
    user_id: i64,
    title: Option<&str>,
    patient_weight_kg: Option<f64>,
    patient_age: Option<i64>,
    issued_on: NaiveDate,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (user_id, title, patient_weight_kg, patient_age, issued_on)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, title, patient_weight_kg, patient_age, issued_on],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_item(
    conn: &Connection,
    prescription_id: i64,
    medication_id: i64,
    frequency: Frequency,
    duration_days: i64,
    dose_value: f64,
    dose_unit: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO prescription_items
         (prescription_id, medication_id, frequency, duration_days, dose_value, dose_unit)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            prescription_id,
            medication_id,
            frequency.as_str(),
            duration_days,
            dose_value,
            dose_unit,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_dose_event(
    conn: &Connection,
    prescription_item_id: i64,
    scheduled_at: NaiveDateTime,
    dose_value: f64,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO dose_events (prescription_item_id, scheduled_at, dose_value)
         VALUES (?1, ?2, ?3)",
        params![prescription_item_id, scheduled_at, dose_value],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_prescription(
    conn: &Connection,
    id: i64,
) -> Result<Option<Prescription>, DatabaseError> {
    conn.query_row(
        "SELECT id, user_id, title, patient_weight_kg, patient_age, issued_on, is_active
         FROM prescriptions WHERE id = ?1",
        params![id],
        |row| {
            Ok(Prescription {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                patient_weight_kg: row.get(3)?,
                patient_age: row.get(4)?,
                issued_on: row.get(5)?,
                is_active: row.get::<_, i32>(6)? != 0,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Items of one prescription, in insertion order.
pub fn items_for_prescription(
    conn: &Connection,
    prescription_id: i64,
) -> Result<Vec<PrescriptionItem>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, prescription_id, medication_id, frequency, duration_days, dose_value, dose_unit
         FROM prescription_items WHERE prescription_id = ?1 ORDER BY id",
    )?;

    let rows = stmt.query_map(params![prescription_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i64>(4)?,
            row.get::<_, f64>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut items = Vec::new();
    for row in rows {
        let (id, prescription_id, medication_id, frequency, duration_days, dose_value, dose_unit) =
            row?;
        items.push(PrescriptionItem {
            id,
            prescription_id,
            medication_id,
            frequency: Frequency::from_str(&frequency)?,
            duration_days,
            dose_value,
            dose_unit,
        });
    }
    Ok(items)
}

/// Dose events of one item, chronological.
pub fn dose_events_for_item(
    conn: &Connection,
    prescription_item_id: i64,
) -> Result<Vec<DoseEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, prescription_item_id, scheduled_at, dose_value, reminder_sent, taken
         FROM dose_events WHERE prescription_item_id = ?1 ORDER BY scheduled_at",
    )?;

    let rows = stmt.query_map(params![prescription_item_id], |row| {
        Ok(DoseEvent {
            id: row.get(0)?,
            prescription_item_id: row.get(1)?,
            scheduled_at: row.get(2)?,
            dose_value: row.get(3)?,
            reminder_sent: row.get::<_, i32>(4)? != 0,
            taken: row.get::<_, i32>(5)? != 0,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Dose events across a user's active prescriptions, chronological,
/// capped at `limit`.
pub fn upcoming_doses_for_user(
    conn: &Connection,
    user_id: i64,
    limit: u32,
) -> Result<Vec<UpcomingDose>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT e.id, m.id, m.name, e.dose_value, i.dose_unit, e.scheduled_at,
                e.reminder_sent, e.taken
         FROM dose_events e
         JOIN prescription_items i ON e.prescription_item_id = i.id
         JOIN medications m ON i.medication_id = m.id
         JOIN prescriptions p ON i.prescription_id = p.id
         WHERE p.user_id = ?1 AND p.is_active = 1
         ORDER BY e.scheduled_at ASC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![user_id, limit], |row| {
        Ok(UpcomingDose {
            id: row.get(0)?,
            medication_id: row.get(1)?,
            medication_name: row.get(2)?,
            dose_value: row.get(3)?,
            dose_unit: row.get(4)?,
            scheduled_at: row.get(5)?,
            reminder_sent: row.get::<_, i32>(6)? != 0,
            taken: row.get::<_, i32>(7)? != 0,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
