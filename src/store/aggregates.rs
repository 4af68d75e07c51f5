//! Aggregations for the stats, trends, category, city, and summary endpoints.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::models::analytics::{
    percentage, round1, round2, CategoryStat, CityStat, DashboardStats, TrendPoint,
};
use crate::models::order::{Order, HIGH_RISK_THRESHOLD};
use crate::store::seed::window_start;

/// Share of at-risk value recovered by blocking refunds.
pub const SAVED_RATIO: f64 = 0.73;

/// Number of weekly buckets in the trend series.
pub const TREND_WEEKS: i64 = 12;

/// Headline counters across all orders.
pub fn stats(orders: &[Order]) -> DashboardStats {
    let total = orders.len() as u64;
    let flagged: Vec<&Order> = orders.iter().filter(|o| o.is_flagged()).collect();
    let at_risk: f64 = flagged.iter().map(|o| o.order_value).sum();
    let avg_risk = if orders.is_empty() {
        0.0
    } else {
        orders.iter().map(|o| f64::from(o.risk_score)).sum::<f64>() / orders.len() as f64
    };

    DashboardStats {
        total_returns: total,
        flagged_orders: flagged.len() as u64,
        fraud_rate: percentage(flagged.len() as u64, total),
        amount_at_risk: round2(at_risk),
        amount_saved: round2(at_risk * SAVED_RATIO),
        avg_risk_score: round1(avg_risk),
    }
}

/// Weekly totals over the seeded order window. Orders without a date are skipped.
pub fn trends(orders: &[Order]) -> Vec<TrendPoint> {
    let start = window_start();

    (0..TREND_WEEKS)
        .map(|week| {
            let from = start + Duration::weeks(week);
            let to = from + Duration::weeks(1);
            let in_week: Vec<&Order> = orders
                .iter()
                .filter(|o| o.date.is_some_and(|d| d >= from && d < to))
                .collect();
            let flagged: Vec<&&Order> = in_week.iter().filter(|o| o.is_flagged()).collect();
            let flagged_value: f64 = flagged.iter().map(|o| o.order_value).sum();

            TrendPoint {
                week: from.format("%b %d").to_string(),
                total_returns: in_week.len() as u64,
                flagged: flagged.len() as u64,
                amount_saved: round2(flagged_value * SAVED_RATIO),
            }
        })
        .collect()
}

#[derive(Default)]
struct Tally {
    total: u64,
    flagged: u64,
    value: f64,
}

fn tally_by<'a>(orders: &'a [Order], key: impl Fn(&'a Order) -> &'a str) -> BTreeMap<&'a str, Tally> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for order in orders {
        let tally = tallies.entry(key(order)).or_default();
        tally.total += 1;
        tally.flagged += u64::from(order.is_flagged());
        tally.value += order.order_value;
    }
    tallies
}

/// Per-category totals, sorted by category name.
pub fn categories(orders: &[Order]) -> Vec<CategoryStat> {
    tally_by(orders, |o| o.category.as_str())
        .into_iter()
        .map(|(category, t)| CategoryStat {
            category: category.to_string(),
            total: t.total,
            flagged: t.flagged,
            value: round2(t.value),
            fraud_rate: percentage(t.flagged, t.total),
        })
        .collect()
}

/// Per-city totals, sorted by city name.
pub fn cities(orders: &[Order]) -> Vec<CityStat> {
    tally_by(orders, |o| o.city.as_str())
        .into_iter()
        .map(|(city, t)| CityStat {
            city: city.to_string(),
            total: t.total,
            flagged: t.flagged,
            fraud_rate: percentage(t.flagged, t.total),
        })
        .collect()
}

/// Server-side analysis text for an order, given the customer's flagged/total history.
pub fn fraud_summary(order: &Order, customer_flagged: usize, customer_total: usize) -> String {
    let high = order.risk_score >= HIGH_RISK_THRESHOLD;
    let fingerprint = if order.fingerprint_match {
        "match".to_string()
    } else {
        format!(
            "MISMATCH ({})",
            order
                .fingerprint_mismatch_reason
                .as_deref()
                .unwrap_or("no detail recorded")
        )
    };

    format!(
        "FRAUD ANALYSIS: {order_id}\n\
         \n\
         Customer: {name} ({customer_id})\n\
         Risk Score: {score}/100\n\
         Primary Flag: {flag}\n\
         \n\
         Behavioral Signals:\n\
         - Total returns by this customer: {returns}\n\
         - Return filed after: {gap} day(s)\n\
         - Item value: {value:.2}\n\
         - Stated reason: {reason}\n\
         - Item fingerprint: {fingerprint}\n\
         - Fraud flags on account: {customer_flagged} of {customer_total} orders\n\
         \n\
         Assessment:\n\
         This order exhibits {probability} fraud probability.\n\
         {advice}\n\
         \n\
         Recommended Action: {action}",
        order_id = order.order_id,
        name = order.customer_name,
        customer_id = order.customer_id,
        score = order.risk_score,
        flag = order.fraud_type.as_deref().unwrap_or("Anomalous pattern detected"),
        returns = order.return_count,
        gap = order.return_day_gap,
        value = order.order_value,
        reason = order.return_reason,
        probability = if high { "HIGH" } else { "MODERATE" },
        advice = if high {
            "Immediate escalation recommended."
        } else {
            "Hold refund pending manual review."
        },
        action = if high {
            "Block refund & escalate to fraud team"
        } else {
            "Hold for manual review"
        },
    )
}
