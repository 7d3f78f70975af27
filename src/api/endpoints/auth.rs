//! Login endpoint.
//!
//! There is no credential check: the request carries an email or phone
//! plus a declared account type, and an unknown identity is registered
//! on the fly. Documented as an open question in DESIGN.md.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::user;
use crate::models::enums::AccountType;
use crate::models::User;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let name = user.display_name().to_string();
        Self {
            id: user.id,
            email: user.email,
            phone: user.phone,
            account_type: user.account_type,
            name,
        }
    }
}

/// `POST /api/auth/login` — look up the user, auto-registering on a miss.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut conn = ctx.open_db()?;
    let email = normalized(&req.email);
    let phone = normalized(&req.phone);

    // Professionals identify by phone, everyone else by email
    let existing = match req.account_type {
        AccountType::Professional => {
            let phone =
                phone.ok_or_else(|| ApiError::BadRequest("Phone number is required".into()))?;
            user::find_user_by_phone(&conn, phone, req.account_type)?
        }
        _ => {
            let email = email.ok_or_else(|| ApiError::BadRequest("Email is required".into()))?;
            user::find_user_by_email(&conn, email, req.account_type)?
        }
    };

    if let Some(found) = existing {
        return Ok(Json(found.into()));
    }

    // Auto-registration: user + profile created atomically
    let tx = conn.transaction().map_err(ApiError::from)?;
    let user_id = user::insert_user(&tx, email, phone, req.account_type)?;
    user::insert_profile(&tx, user_id, &default_profile_name(email))?;
    tx.commit().map_err(ApiError::from)?;

    tracing::info!(user_id, account_type = req.account_type.as_str(), "auto-registered user");

    let created = user::get_user(&conn, user_id)?
        .ok_or_else(|| ApiError::Internal("freshly created user missing".into()))?;
    Ok(Json(created.into()))
}

fn normalized(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Profile name fallback: email local part, else a placeholder.
fn default_profile_name(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .filter(|local| !local.is_empty())
        .unwrap_or("New User")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_name_from_email_local_part() {
        assert_eq!(default_profile_name(Some("marie.curie@example.org")), "marie.curie");
        assert_eq!(default_profile_name(None), "New User");
        assert_eq!(default_profile_name(Some("@nowhere")), "New User");
    }
}
