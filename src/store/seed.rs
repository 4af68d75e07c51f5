//! Deterministic sample data for the stub Order Service.
//!
//! Risk scores here are fixture data, not a model: they are drawn from the
//! seeded RNG and nudged by the same behavioral signals the dashboard
//! displays, so flagged orders look plausible in a demo.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::analytics::round2;
use crate::models::order::{Order, OrderStatus};

pub const SEED_ORDER_COUNT: usize = 200;

const NAMES: &[&str] = &[
    "Arjun Sharma", "Priya Patel", "Rohan Mehta", "Sneha Iyer", "Vikram Nair",
    "Ananya Gupta", "Kiran Reddy", "Divya Joshi", "Aditya Kumar", "Pooja Singh",
    "Rahul Verma", "Neha Kapoor", "Siddharth Rao", "Kavya Nambiar", "Amit Shah",
    "Shreya Mishra", "Rajesh Pillai", "Lakshmi Agarwal", "Vivek Tiwari", "Meera Bose",
];

pub const CATEGORIES: &[&str] = &[
    "Electronics", "Clothing", "Footwear", "Home Decor", "Accessories", "Sports",
];

const REASONS: &[&str] = &[
    "Defective product", "Wrong size", "Changed mind", "Not as described",
    "Better price elsewhere", "Damaged in shipping", "Duplicate order",
];

const CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Chennai", "Hyderabad", "Pune", "Kolkata",
];

const FINGERPRINT_REASONS: &[&str] = &[
    "Serial number differs from shipped unit",
    "Item weight deviates from catalog entry",
    "Packaging barcode does not match dispatch scan",
];

/// Categories for which a size complaint is a plausible return reason.
const SIZED_CATEGORIES: &[&str] = &["Clothing", "Footwear", "Sports"];

/// First day of the seeded order window.
pub fn window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 1).expect("2024-11-01 is a valid date")
}

/// Whether the stated return reason makes no sense for the category.
pub fn reason_mismatches_category(reason: &str, category: &str) -> bool {
    reason == "Wrong size" && !SIZED_CATEGORIES.contains(&category)
}

/// Expensive item returned within a day: likely used then returned.
pub fn is_wardrobing(order_value: f64, return_day_gap: u32) -> bool {
    order_value > 5000.0 && return_day_gap <= 1
}

/// Generate `count` orders from `seed`. The same seed always yields the same orders.
pub fn generate(seed: u64, count: usize) -> Vec<Order> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = window_start();

    (0..count)
        .map(|i| {
            let ci = rng.random_range(0..NAMES.len());
            let category = pick(&mut rng, CATEGORIES);
            let return_reason = pick(&mut rng, REASONS);
            let order_value = round2(rng.random_range(299.0..15999.0));
            let return_count: u32 = rng.random_range(1..=12);
            let return_day_gap: u32 = rng.random_range(0..=30);
            let date = start + Duration::days(rng.random_range(0..90));
            let fingerprint_match = rng.random_bool(0.85);
            let fingerprint_mismatch_reason =
                (!fingerprint_match).then(|| pick(&mut rng, FINGERPRINT_REASONS).to_string());

            let reason_category_mismatch = reason_mismatches_category(return_reason, category);
            let photo_verification_required = is_wardrobing(order_value, return_day_gap);

            let mut risk: u32 = rng.random_range(5..=55);
            if return_count >= 6 {
                risk += 15;
            }
            if !fingerprint_match {
                risk += 20;
            }
            if reason_category_mismatch {
                risk += 10;
            }
            if photo_verification_required {
                risk += 15;
            }
            if return_day_gap == 0 {
                risk += 5;
            }
            let risk_score = risk.min(100) as u8;

            let mut order = Order {
                order_id: format!("ORD{}", 100_000 + i),
                customer_id: format!("CUST{}", 1000 + ci),
                customer_name: NAMES[ci].to_string(),
                city: pick(&mut rng, CITIES).to_string(),
                category: category.to_string(),
                return_reason: return_reason.to_string(),
                order_value,
                risk_score,
                return_day_gap,
                return_count,
                fingerprint_match,
                fingerprint_mismatch_reason,
                reason_category_mismatch,
                photo_verification_required,
                status: OrderStatus::PendingReview,
                is_locked: false,
                date: Some(date),
                fraud_type: None,
            };
            if order.is_flagged() {
                order.status = OrderStatus::Flagged;
                order.fraud_type = Some(explain(&order));
            }
            order
        })
        .collect()
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// One-line explanation of why an order was flagged.
pub fn explain(order: &Order) -> String {
    let mut reasons = Vec::new();

    if order.return_count >= 8 {
        reasons.push(format!("Serial returner: {} returns on record", order.return_count));
    } else if order.return_count >= 5 {
        reasons.push(format!("High return frequency: {} returns", order.return_count));
    }

    if is_wardrobing(order.order_value, order.return_day_gap) {
        reasons.push(format!(
            "Wardrobing: {:.0} item returned in {} day(s)",
            order.order_value, order.return_day_gap
        ));
    }

    if order.order_value > 10_000.0 && order.return_count >= 3 {
        reasons.push(format!("High-value repeat pattern: {:.0}", order.order_value));
    }

    if order.return_day_gap == 0 {
        reasons.push("Same-day return, possible receipt manipulation".to_string());
    }

    if !order.fingerprint_match {
        reasons.push("Item fingerprint mismatch".to_string());
    }

    if reasons.is_empty() {
        reasons.push(format!(
            "Anomalous behavior detected, risk score {}/100",
            order.risk_score
        ));
    }

    reasons.join(" · ")
}
