use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::NotificationChannel;

/// Id of a seeded notification channel row.
pub fn channel_id(conn: &Connection, channel: NotificationChannel) -> Result<i64, DatabaseError> {
    conn.query_row(
        "SELECT id FROM notification_channels WHERE name = ?1",
        params![channel.as_str()],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}

/// Set (or replace) the contact value a user wants reminders on for one
/// channel. One row per (user, channel).
pub fn upsert_preference(
    conn: &Connection,
    user_id: i64,
    channel: NotificationChannel,
    contact_value: &str,
) -> Result<(), DatabaseError> {
    let channel_id = channel_id(conn, channel)?;
    conn.execute(
        "INSERT OR REPLACE INTO notification_preferences
         (user_id, channel_id, contact_value, is_active)
         VALUES (?1, ?2, ?3, 1)",
        params![user_id, channel_id, contact_value],
    )?;
    Ok(())
}

/// The stored contact value for one (user, channel), if any.
pub fn get_preference(
    conn: &Connection,
    user_id: i64,
    channel: NotificationChannel,
) -> Result<Option<String>, DatabaseError> {
    let channel_id = channel_id(conn, channel)?;
    conn.query_row(
        "SELECT contact_value FROM notification_preferences
         WHERE user_id = ?1 AND channel_id = ?2 AND is_active = 1",
        params![user_id, channel_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(DatabaseError::from)
}
