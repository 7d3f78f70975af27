//! Medication catalog endpoints.
//!
//! - `GET /api/medications` — list with optional search / new-this-month filter
//! - `POST /api/medications` — register a catalog entry (pharmacist UI)

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::db::repository::medication::{self, MedicationFilter};
use crate::models::Medication;

#[derive(Deserialize)]
pub struct MedListQuery {
    pub q: Option<String>,
    #[serde(rename = "new")]
    pub new_only: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub price: String,
    pub date_added: String,
    #[serde(rename = "type")]
    pub usage_type: String,
    pub precautions: Option<String>,
    pub mode: Option<String>,
    pub moment: Option<String>,
}

impl From<Medication> for MedicationDto {
    fn from(med: Medication) -> Self {
        Self {
            id: med.id,
            name: med.name,
            description: med.description,
            photo_url: med.photo_url,
            price: med.price,
            date_added: med.added_at.to_string(),
            usage_type: med.usage_type,
            precautions: med.dietary_precautions,
            mode: med.administration_mode,
            moment: med.meal_timing,
        }
    }
}

#[derive(Serialize)]
pub struct MedicationsResponse {
    pub medications: Vec<MedicationDto>,
}

/// `GET /api/medications` — catalog listing.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<MedListQuery>,
) -> Result<Json<MedicationsResponse>, ApiError> {
    let conn = ctx.open_db()?;

    let filter = MedicationFilter {
        search: query.q,
        added_this_month: query.new_only.unwrap_or(false),
    };
    let medications = medication::list_medications(&conn, &filter)?
        .into_iter()
        .map(MedicationDto::from)
        .collect();

    Ok(Json(MedicationsResponse { medications }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub price: Option<String>,
    pub usage_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicationResponse {
    pub success: bool,
    pub medication_id: i64,
}

/// `POST /api/medications` — register a new catalog entry.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateMedicationRequest>,
) -> Result<(StatusCode, Json<CreateMedicationResponse>), ApiError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Medication name is required".into()))?;

    let conn = ctx.open_db()?;
    let medication_id = medication::insert_medication(
        &conn,
        name,
        req.description.as_deref().unwrap_or(""),
        req.photo_url.as_deref().unwrap_or(""),
        req.price.as_deref().unwrap_or(""),
        req.usage_type.as_deref().unwrap_or("tablet"),
    )
    .map_err(|e| {
        if db::is_unique_violation(&e) {
            ApiError::Conflict("A medication with this name is already registered".into())
        } else {
            ApiError::from(e)
        }
    })?;

    tracing::info!(medication_id, name, "registered medication");

    Ok((
        StatusCode::CREATED,
        Json(CreateMedicationResponse {
            success: true,
            medication_id,
        }),
    ))
}
