//! Pharmacy endpoints (ownership, stock, distance search).
//!
//! - `GET    /api/pharmacies?pharmacistId=` — pharmacies owned by a pharmacist
//! - `POST   /api/pharmacies` — create, optionally with initial stock
//! - `DELETE /api/pharmacies/:id`
//! - `GET    /api/pharmacies/:id/stock`
//! - `POST   /api/pharmacies/:id/stock` — upsert one line
//! - `GET    /api/pharmacies/search?medId=&lat=&lng=` — distance-ranked search

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{pharmacy, stock};
use crate::geo;
use crate::models::{Pharmacy, StockLine};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyListQuery {
    pub pharmacist_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub open_time: String,
    pub close_time: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Pharmacy> for PharmacyDto {
    fn from(p: Pharmacy) -> Self {
        Self {
            id: p.id,
            name: p.name,
            address: p.address,
            phone: p.phone,
            open_time: p.open_time,
            close_time: p.close_time,
            latitude: p.latitude,
            longitude: p.longitude,
        }
    }
}

#[derive(Serialize)]
pub struct PharmaciesResponse {
    pub pharmacies: Vec<PharmacyDto>,
}

/// `GET /api/pharmacies` — pharmacies owned by one pharmacist.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<PharmacyListQuery>,
) -> Result<Json<PharmaciesResponse>, ApiError> {
    let pharmacist_id = query
        .pharmacist_id
        .ok_or_else(|| ApiError::BadRequest("Missing pharmacistId".into()))?;

    let conn = ctx.open_db()?;
    let pharmacies = pharmacy::list_for_pharmacist(&conn, pharmacist_id)?
        .into_iter()
        .map(PharmacyDto::from)
        .collect();
    Ok(Json(PharmaciesResponse { pharmacies }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialStockLine {
    pub medication_id: i64,
    pub quantity: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePharmacyRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub pharmacist_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub initial_stock: Vec<InitialStockLine>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePharmacyResponse {
    pub success: bool,
    pub pharmacy_id: i64,
}

/// `POST /api/pharmacies` — create a pharmacy and its initial stock in
/// one transaction.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreatePharmacyRequest>,
) -> Result<(StatusCode, Json<CreatePharmacyResponse>), ApiError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Pharmacy name is required".into()))?;
    let pharmacist_id = req
        .pharmacist_id
        .ok_or_else(|| ApiError::BadRequest("Pharmacist id is required".into()))?;

    let mut conn = ctx.open_db()?;
    let tx = conn.transaction().map_err(ApiError::from)?;

    let pharmacy_id = pharmacy::insert_pharmacy(
        &tx,
        name,
        req.address.as_deref().unwrap_or(""),
        req.phone.as_deref().unwrap_or(""),
        req.open_time.as_deref().unwrap_or("08:00"),
        req.close_time.as_deref().unwrap_or("20:00"),
        pharmacist_id,
        req.latitude,
        req.longitude,
    )?;
    for line in &req.initial_stock {
        stock::upsert_stock(&tx, pharmacy_id, line.medication_id, line.quantity)?;
    }

    tx.commit().map_err(ApiError::from)?;
    tracing::info!(pharmacy_id, name, "created pharmacy");

    Ok((
        StatusCode::CREATED,
        Json(CreatePharmacyResponse {
            success: true,
            pharmacy_id,
        }),
    ))
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `DELETE /api/pharmacies/:id` — remove a pharmacy and its stock.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(pharmacy_id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let conn = ctx.open_db()?;
    if !pharmacy::delete_pharmacy(&conn, pharmacy_id)? {
        return Err(ApiError::NotFound("Pharmacy not found".into()));
    }
    tracing::info!(pharmacy_id, "deleted pharmacy");
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLineDto {
    pub id: i64,
    pub medication_id: i64,
    pub medication_name: String,
    pub quantity: i64,
}

impl From<StockLine> for StockLineDto {
    fn from(line: StockLine) -> Self {
        Self {
            id: line.id,
            medication_id: line.medication_id,
            medication_name: line.medication_name,
            quantity: line.quantity,
        }
    }
}

#[derive(Serialize)]
pub struct StockResponse {
    pub stock: Vec<StockLineDto>,
}

/// `GET /api/pharmacies/:id/stock` — stock of one pharmacy.
pub async fn get_stock(
    State(ctx): State<ApiContext>,
    Path(pharmacy_id): Path<i64>,
) -> Result<Json<StockResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let stock = stock::stock_for_pharmacy(&conn, pharmacy_id)?
        .into_iter()
        .map(StockLineDto::from)
        .collect();
    Ok(Json(StockResponse { stock }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    pub medication_id: Option<i64>,
    pub quantity: Option<i64>,
}

/// `POST /api/pharmacies/:id/stock` — set one (pharmacy, medication)
/// quantity. Idempotent upsert; last write wins.
pub async fn update_stock(
    State(ctx): State<ApiContext>,
    Path(pharmacy_id): Path<i64>,
    Json(req): Json<UpdateStockRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let medication_id = req
        .medication_id
        .ok_or_else(|| ApiError::BadRequest("Missing medicationId".into()))?;

    let conn = ctx.open_db()?;
    stock::upsert_stock(&conn, pharmacy_id, medication_id, req.quantity.unwrap_or(0))?;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "medId")]
    pub med_id: Option<i64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub quantity: i64,
    pub distance: Option<f64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub pharmacies: Vec<SearchHit>,
}

/// `GET /api/pharmacies/search` — pharmacies with positive stock of a
/// medication, ranked by haversine distance when coordinates allow,
/// alphabetically otherwise.
pub async fn search(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let medication_id = query
        .med_id
        .ok_or_else(|| ApiError::BadRequest("medId is required".into()))?;

    let conn = ctx.open_db()?;
    let mut hits: Vec<SearchHit> = stock::pharmacies_with_stock(&conn, medication_id)?
        .into_iter()
        .map(|p| {
            let distance = match (query.lat, query.lng, p.latitude, p.longitude) {
                (Some(user_lat), Some(user_lng), Some(lat), Some(lng)) => {
                    Some(geo::haversine_km_rounded(user_lat, user_lng, lat, lng))
                }
                _ => None,
            };
            SearchHit {
                id: p.id,
                name: p.name,
                address: p.address,
                phone: p.phone,
                latitude: p.latitude,
                longitude: p.longitude,
                quantity: p.quantity,
                distance,
            }
        })
        .collect();

    // Ranked hits first, ties and unranked hits alphabetical
    hits.sort_by(|a, b| {
        let da = a.distance.unwrap_or(f64::INFINITY);
        let db = b.distance.unwrap_or(f64::INFINITY);
        da.partial_cmp(&db)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(Json(SearchResponse { pharmacies: hits }))
}
