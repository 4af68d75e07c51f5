//! Route definitions for the stub Order Service.

pub mod analytics;
pub mod health;
pub mod orders;

use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full router over `state`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/stats", get(analytics::stats))
        .route("/trends", get(analytics::trends))
        .route("/categories", get(analytics::categories))
        .route("/cities", get(analytics::cities))
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::get_by_id))
        .route("/orders/{id}/status", patch(orders::update_status))
        .route("/fraud-summary/{id}", get(orders::fraud_summary));

    Router::new()
        .route("/health/live", get(health::live))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
