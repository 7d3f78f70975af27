//! Prescription endpoints.
//!
//! - `GET /api/prescriptions?userId=` — upcoming doses + adherence stats
//! - `POST /api/prescriptions` — create a prescription and expand its
//!   dose calendar in one transaction

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{medication, pharmacy, preference, prescription};
use crate::models::enums::NotificationChannel;
use crate::models::UpcomingDose;
use crate::schedule::{self, MedicationEntry};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionListQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseDto {
    pub id: i64,
    pub medication_id: i64,
    pub medication_name: String,
    pub dose: f64,
    pub unit: String,
    pub time: String,
    pub scheduled_at: String,
    pub reminder_sent: bool,
    pub taken: bool,
}

impl From<UpcomingDose> for DoseDto {
    fn from(dose: UpcomingDose) -> Self {
        Self {
            id: dose.id,
            medication_id: dose.medication_id,
            medication_name: dose.medication_name,
            dose: dose.dose_value,
            unit: dose.dose_unit,
            time: dose.scheduled_at.format("%H:%M").to_string(),
            scheduled_at: dose.scheduled_at.to_string(),
            reminder_sent: dose.reminder_sent,
            taken: dose.taken,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub observance_rate: u32,
    pub active_reminders: u32,
    pub planned_reminders: u32,
    pub nearby_pharmacies: i64,
    pub next_dose: Option<DoseDto>,
}

#[derive(Serialize)]
pub struct PrescriptionsResponse {
    pub doses: Vec<DoseDto>,
    pub stats: DashboardStats,
}

/// Cap on the dose list returned to the dashboard.
const DOSE_LIST_LIMIT: u32 = 100;

/// `GET /api/prescriptions` — dose list + computed stats for one user.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<PrescriptionListQuery>,
) -> Result<Json<PrescriptionsResponse>, ApiError> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::BadRequest("Missing userId".into()))?;

    let conn = ctx.open_db()?;
    let doses: Vec<DoseDto> =
        prescription::upcoming_doses_for_user(&conn, user_id, DOSE_LIST_LIMIT)?
            .into_iter()
            .map(DoseDto::from)
            .collect();

    let taken_flags: Vec<bool> = doses.iter().map(|d| d.taken).collect();
    let summary = schedule::summarize_adherence(&taken_flags);
    let stats = DashboardStats {
        observance_rate: summary.observance_rate,
        active_reminders: summary.active_reminders,
        planned_reminders: summary.planned_reminders,
        nearby_pharmacies: pharmacy::count_pharmacies(&conn)?,
        next_dose: summary.next_dose.map(|i| doses[i].clone()),
    };

    Ok(Json(PrescriptionsResponse { doses, stats }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifConfig {
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub channel: Option<NotificationChannel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub weight: Option<f64>,
    pub age: Option<i64>,
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    pub notif_config: Option<NotifConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionResponse {
    pub success: bool,
    pub prescription_id: i64,
}

/// `POST /api/prescriptions` — persist the prescription, its items and
/// the expanded dose calendar atomically.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreatePrescriptionRequest>,
) -> Result<(StatusCode, Json<CreatePrescriptionResponse>), ApiError> {
    let user_id = req
        .user_id
        .ok_or_else(|| ApiError::BadRequest("User id is required".into()))?;

    let start_date = chrono::Local::now().date_naive();
    let mut conn = ctx.open_db()?;
    let tx = conn.transaction().map_err(ApiError::from)?;

    let prescription_id = prescription::insert_prescription(
        &tx,
        user_id,
        req.title.as_deref(),
        req.weight,
        req.age,
        start_date,
    )?;

    if let Some(config) = &req.notif_config {
        if let Some(contact) = config.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            preference::upsert_preference(
                &tx,
                user_id,
                config.channel.unwrap_or(NotificationChannel::Sms),
                contact,
            )?;
        }
    }

    let mut dose_count = 0usize;
    for entry in &req.medications {
        // Unnamed rows from the form are dropped, not stored
        if entry.name.trim().is_empty() {
            continue;
        }

        let medication_id = medication::find_or_create_by_name(&tx, entry.name.trim())?;
        let item_id = prescription::insert_item(
            &tx,
            prescription_id,
            medication_id,
            entry.frequency(),
            i64::from(entry.duration_days),
            entry.dose_value,
            entry.unit_label(),
        )?;

        for dose in schedule::expand_entry(entry, start_date) {
            prescription::insert_dose_event(&tx, item_id, dose.scheduled_at, dose.dose_value)?;
            dose_count += 1;
        }
    }

    tx.commit().map_err(ApiError::from)?;
    tracing::info!(prescription_id, user_id, dose_count, "created prescription");

    Ok((
        StatusCode::CREATED,
        Json(CreatePrescriptionResponse {
            success: true,
            prescription_id,
        }),
    ))
}
