//! Shared types for the API layer.

use std::sync::Arc;

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::state::AppState;

/// Shared context for all API routes.
///
/// Cheap to clone; handlers pull a per-request database connection
/// through it.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Open a database connection for the current request.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        self.state.open_db().map_err(ApiError::from)
    }
}
