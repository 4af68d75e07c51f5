//! Order model and the status enums shared by the dashboard and the stub service.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Risk score at or above which an order counts as flagged.
pub const FLAG_THRESHOLD: u8 = 70;

/// Risk score at or above which an order is high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 85;

/// Return count at or above which a customer is a serial returner.
pub const SERIAL_RETURNER_THRESHOLD: u32 = 6;

// -- Enums --

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Flagged,
    #[serde(rename = "Pending Review")]
    PendingReview,
    Escalated,
    Cleared,
}

/// Visual tone of a status or risk badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Danger,
    Warning,
    Success,
}

impl OrderStatus {
    /// Human-readable label, identical to the wire representation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flagged => "Flagged",
            Self::PendingReview => "Pending Review",
            Self::Escalated => "Escalated",
            Self::Cleared => "Cleared",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Flagged | Self::Escalated => Tone::Danger,
            Self::PendingReview => Tone::Warning,
            Self::Cleared => Tone::Success,
        }
    }

    /// A recorded human decision. Terminal statuses lock the order.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Escalated | Self::Cleared)
    }

    /// Statuses an agent may request from the review view.
    pub fn is_agent_decision(&self) -> bool {
        !matches!(self, Self::Flagged)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk band derived from the 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score >= FLAG_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::High => Tone::Danger,
            Self::Medium => Tone::Warning,
            Self::Low => Tone::Success,
        }
    }
}

// -- Core Order --

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub city: String,
    pub category: String,
    pub return_reason: String,
    pub order_value: f64,
    #[serde(deserialize_with = "deserialize_risk_score")]
    pub risk_score: u8,
    pub return_day_gap: u32,
    pub return_count: u32,
    pub fingerprint_match: bool,
    #[serde(default)]
    pub fingerprint_mismatch_reason: Option<String>,
    pub reason_category_mismatch: bool,
    pub photo_verification_required: bool,
    pub status: OrderStatus,
    pub is_locked: bool,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub fraud_type: Option<String>,
}

impl Order {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }

    pub fn is_flagged(&self) -> bool {
        self.risk_score >= FLAG_THRESHOLD
    }

    pub fn is_serial_returner(&self) -> bool {
        self.return_count >= SERIAL_RETURNER_THRESHOLD
    }

    /// Whether the review workflow must refuse status changes.
    ///
    /// Trusts the server's `is_locked` and additionally treats terminal
    /// statuses as locked.
    pub fn is_review_locked(&self) -> bool {
        self.is_locked || self.status.is_terminal()
    }
}

/// Accept integer or float scores, rounded and clamped to 0-100.
fn deserialize_risk_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(de::Error::custom(format!("risk_score must be finite, got {raw}")));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Request body for `PATCH /api/orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Response of `GET /api/fraud-summary/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FraudSummary {
    pub summary: String,
    #[serde(default)]
    pub order: Option<Order>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_review_uses_spaced_wire_name() {
        let json = serde_json::to_value(OrderStatus::PendingReview).unwrap();
        assert_eq!(json, "Pending Review");
        let parsed: OrderStatus = serde_json::from_str("\"Pending Review\"").unwrap();
        assert_eq!(parsed, OrderStatus::PendingReview);
    }

    #[test]
    fn label_matches_wire_name_for_every_status() {
        for status in [
            OrderStatus::Flagged,
            OrderStatus::PendingReview,
            OrderStatus::Escalated,
            OrderStatus::Cleared,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.label());
        }
    }

    #[test]
    fn status_tones() {
        assert_eq!(OrderStatus::Flagged.tone(), Tone::Danger);
        assert_eq!(OrderStatus::Escalated.tone(), Tone::Danger);
        assert_eq!(OrderStatus::PendingReview.tone(), Tone::Warning);
        assert_eq!(OrderStatus::Cleared.tone(), Tone::Success);
    }

    #[test]
    fn only_escalated_and_cleared_are_terminal() {
        assert!(OrderStatus::Escalated.is_terminal());
        assert!(OrderStatus::Cleared.is_terminal());
        assert!(!OrderStatus::Flagged.is_terminal());
        assert!(!OrderStatus::PendingReview.is_terminal());
    }

    #[test]
    fn flagged_is_not_an_agent_decision() {
        assert!(!OrderStatus::Flagged.is_agent_decision());
        assert!(OrderStatus::PendingReview.is_agent_decision());
    }

    #[test]
    fn risk_band_boundaries() {
        assert_eq!(RiskBand::from_score(100), RiskBand::High);
        assert_eq!(RiskBand::from_score(85), RiskBand::High);
        assert_eq!(RiskBand::from_score(84), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(70), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(69), RiskBand::Low);
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
    }

    #[test]
    fn terminal_status_locks_review_even_without_flag() {
        let mut order = fixtures::order("ORD100001");
        assert!(!order.is_review_locked());
        order.status = OrderStatus::Cleared;
        assert!(order.is_review_locked());
    }

    #[test]
    fn lock_flag_alone_locks_review() {
        let mut order = fixtures::order("ORD100001");
        order.is_locked = true;
        assert!(order.is_review_locked());
    }

    #[test]
    fn order_deserializes_without_optional_fields() {
        let json = serde_json::json!({
            "order_id": "ORD100007",
            "customer_id": "CUST1002",
            "customer_name": "Rohan Mehta",
            "city": "Delhi",
            "category": "Clothing",
            "return_reason": "Wrong size",
            "order_value": 1299.5,
            "risk_score": 72,
            "return_day_gap": 3,
            "return_count": 2,
            "fingerprint_match": true,
            "reason_category_mismatch": false,
            "photo_verification_required": false,
            "status": "Pending Review",
            "is_locked": false
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::PendingReview);
        assert!(order.fingerprint_mismatch_reason.is_none());
        assert!(order.date.is_none());
        assert!(order.is_flagged());
    }

    fn order_json(risk_score: serde_json::Value) -> serde_json::Value {
        let mut json = serde_json::to_value(fixtures::order("ORD100008")).unwrap();
        json["risk_score"] = risk_score;
        json
    }

    #[test]
    fn order_accepts_float_risk_score() {
        let order: Order = serde_json::from_value(order_json(serde_json::json!(87.0))).unwrap();
        assert_eq!(order.risk_score, 87);
        assert_eq!(order.risk_band(), RiskBand::High);

        let order: Order = serde_json::from_value(order_json(serde_json::json!(69.6))).unwrap();
        assert_eq!(order.risk_score, 70);
        assert!(order.is_flagged());
    }

    #[test]
    fn out_of_range_risk_score_is_clamped() {
        let order: Order = serde_json::from_value(order_json(serde_json::json!(140.2))).unwrap();
        assert_eq!(order.risk_score, 100);
        let order: Order = serde_json::from_value(order_json(serde_json::json!(-3))).unwrap();
        assert_eq!(order.risk_score, 0);
    }

    #[test]
    fn non_numeric_risk_score_is_rejected() {
        let result = serde_json::from_value::<Order>(order_json(serde_json::json!("high")));
        assert!(result.is_err());
    }
}
