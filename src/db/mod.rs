pub mod repository;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

/// Whether an error is a SQLite UNIQUE constraint failure.
///
/// Used by handlers to turn a duplicate catalog name into a 409
/// instead of a generic 500.
pub fn is_unique_violation(err: &DatabaseError) -> bool {
    match err {
        DatabaseError::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_detected() {
        let conn = sqlite::open_memory_database().unwrap();
        conn.execute("INSERT INTO medications (name) VALUES ('Aspirin')", [])
            .unwrap();
        let err: DatabaseError = conn
            .execute("INSERT INTO medications (name) VALUES ('aspirin')", [])
            .unwrap_err()
            .into();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn other_errors_are_not_unique_violations() {
        let err = DatabaseError::NotFound {
            entity_type: "medication".into(),
            id: "7".into(),
        };
        assert!(!is_unique_violation(&err));
    }
}
