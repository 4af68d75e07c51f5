//! Order routes: list with filters, detail, fraud summary, and status decisions.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::models::order::{FraudSummary, Order, StatusUpdateRequest};
use crate::models::query::OrderQuery;
use crate::store::aggregates;
use crate::AppState;

/// GET /api/orders: list orders with filters, highest risk first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Json<Vec<Order>> {
    Json(state.store.list(&query).await)
}

/// GET /api/orders/{id}: single order.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.store.get(&order_id).await?))
}

/// PATCH /api/orders/{id}/status: record an agent decision.
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<Order>, AppError> {
    let order = state.store.update_status(&order_id, body.status).await?;
    Ok(Json(order))
}

/// GET /api/fraud-summary/{id}: analysis text with the order it describes.
pub async fn fraud_summary(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<FraudSummary>, AppError> {
    let order = state.store.get(&order_id).await?;
    let (flagged, total) = state.store.customer_history(&order.customer_id).await;
    Ok(Json(FraudSummary {
        summary: aggregates::fraud_summary(&order, flagged, total),
        order: Some(order),
    }))
}
