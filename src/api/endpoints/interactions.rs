//! Medication interaction endpoints (pharmacist UI).
//!
//! - `GET /api/medications/interactions` — risk-pair list
//! - `POST /api/medications/interactions` — record a pair

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::interaction;
use crate::models::enums::RiskLevel;
use crate::models::InteractionDetail;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionDto {
    pub id: i64,
    pub source_name: String,
    pub restricted_name: String,
    pub risk_level: RiskLevel,
    pub description: String,
}

impl From<InteractionDetail> for InteractionDto {
    fn from(detail: InteractionDetail) -> Self {
        Self {
            id: detail.id,
            source_name: detail.source_name,
            restricted_name: detail.restricted_name,
            risk_level: detail.risk_level,
            description: detail.description,
        }
    }
}

#[derive(Serialize)]
pub struct InteractionsResponse {
    pub interactions: Vec<InteractionDto>,
}

/// `GET /api/medications/interactions` — all recorded pairs with names.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<InteractionsResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let interactions = interaction::list_interactions(&conn)?
        .into_iter()
        .map(InteractionDto::from)
        .collect();
    Ok(Json(InteractionsResponse { interactions }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteractionRequest {
    pub source_medication_id: Option<i64>,
    pub restricted_medication_id: Option<i64>,
    pub risk_level: Option<RiskLevel>,
    pub description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteractionResponse {
    pub success: bool,
    pub interaction_id: i64,
}

/// `POST /api/medications/interactions` — record a new pair.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<CreateInteractionResponse>), ApiError> {
    let (source, restricted) = match (req.source_medication_id, req.restricted_medication_id) {
        (Some(s), Some(r)) => (s, r),
        _ => {
            return Err(ApiError::BadRequest(
                "Source and restricted medication ids are required".into(),
            ))
        }
    };

    let conn = ctx.open_db()?;
    let interaction_id = interaction::insert_interaction(
        &conn,
        source,
        restricted,
        req.risk_level.unwrap_or(RiskLevel::Moderate),
        req.description.as_deref().unwrap_or(""),
    )?;

    tracing::info!(interaction_id, source, restricted, "recorded interaction");

    Ok((
        StatusCode::CREATED,
        Json(CreateInteractionResponse {
            success: true,
            interaction_id,
        }),
    ))
}
