//! Shared application state.
//!
//! The database handle is injected here once at startup instead of
//! living in a module-level singleton; handlers borrow a fresh
//! connection per request.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};

/// State shared by all request handlers.
///
/// Wrapped in `Arc` by the router. Holds the database path; the schema
/// is migrated once in `new`, after which `open_db` hands out plain
/// per-request connections.
pub struct AppState {
    db_path: PathBuf,
}

impl AppState {
    /// Open (creating if needed) and migrate the database, then keep
    /// its path for per-request connections.
    pub fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = db::open_database(&db_path)?;
        drop(conn);
        Ok(Self { db_path })
    }

    /// Open a connection for one request. Migrations already ran.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_existing(&self.db_path)
    }
}
