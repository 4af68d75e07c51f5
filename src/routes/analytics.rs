//! Aggregate routes: headline stats, weekly trends, category and city breakdowns.

use axum::{extract::State, Json};

use crate::models::analytics::{CategoryStat, CityStat, DashboardStats, TrendPoint};
use crate::store::aggregates;
use crate::AppState;

/// GET /api/stats: headline counters.
pub async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(aggregates::stats(&state.store.all().await))
}

/// GET /api/trends: weekly flagged vs total series.
pub async fn trends(State(state): State<AppState>) -> Json<Vec<TrendPoint>> {
    Json(aggregates::trends(&state.store.all().await))
}

/// GET /api/categories: per-category fraud rates.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategoryStat>> {
    Json(aggregates::categories(&state.store.all().await))
}

/// GET /api/cities: per-city fraud rates.
pub async fn cities(State(state): State<AppState>) -> Json<Vec<CityStat>> {
    Json(aggregates::cities(&state.store.all().await))
}
