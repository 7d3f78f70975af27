use serde::{Deserialize, Serialize};

use super::enums::AccountType;

/// A user row joined with its profile name.
///
/// Users are created opportunistically on first login and never deleted.
/// Professionals are identified by phone, other accounts by email, so
/// both columns are nullable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub account_type: AccountType,
    pub is_pharmacist: bool,
    pub full_name: Option<String>,
}

impl User {
    /// Display name, with the placeholder the profile fallback uses.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("User")
    }
}
