//! Aggregate views served next to the order list.

use serde::{Deserialize, Serialize};

/// Headline counters for the overview cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardStats {
    pub total_returns: u64,
    pub flagged_orders: u64,
    /// Percentage of returns that are flagged, one decimal.
    pub fraud_rate: f64,
    pub amount_at_risk: f64,
    pub amount_saved: f64,
    pub avg_risk_score: f64,
}

/// One week of the returns trend series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// Week label, e.g. `Nov 01`.
    pub week: String,
    pub total_returns: u64,
    pub flagged: u64,
    pub amount_saved: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub total: u64,
    pub flagged: u64,
    pub value: f64,
    pub fraud_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityStat {
    pub city: String,
    pub total: u64,
    pub flagged: u64,
    pub fraud_rate: f64,
}

/// Percentage of `part` in `total`, rounded to one decimal. Zero when empty.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places (currency).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
