//! API router.
//!
//! Returns a composable `Router` with all routes nested under `/api`.
//! CORS is permissive: the browser client is served from its own
//! origin in development.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::state::AppState;

/// Build the API router around shared application state.
pub fn api_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/login", post(endpoints::auth::login))
        .route(
            "/medications",
            get(endpoints::medications::list).post(endpoints::medications::create),
        )
        .route(
            "/medications/interactions",
            get(endpoints::interactions::list).post(endpoints::interactions::create),
        )
        .route(
            "/pharmacies",
            get(endpoints::pharmacies::list).post(endpoints::pharmacies::create),
        )
        .route("/pharmacies/search", get(endpoints::pharmacies::search))
        .route("/pharmacies/:id", delete(endpoints::pharmacies::delete))
        .route(
            "/pharmacies/:id/stock",
            get(endpoints::pharmacies::get_stock).post(endpoints::pharmacies::update_stock),
        )
        .route(
            "/prescriptions",
            get(endpoints::prescriptions::list).post(endpoints::prescriptions::create),
        )
        .with_state(ctx);

    Router::new().nest("/api", api).layer(CorsLayer::permissive())
}
