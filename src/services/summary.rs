//! Locally generated fraud summary, used when the Order Service cannot provide one.
//!
//! The text is a pure function of the order's own fields so that the same
//! order always renders the same analysis.

use crate::models::order::{Order, RiskBand};

pub const REASON_MISMATCH_MARKER: &str = "REASON MISMATCH";
pub const FINGERPRINT_MISMATCH_MARKER: &str = "FINGERPRINT MISMATCH";
pub const PHOTO_VERIFICATION_MARKER: &str = "PHOTO VERIFICATION REQUIRED";
pub const SERIAL_RETURNER_MARKER: &str = "SERIAL RETURNER";
pub const NO_SIGNALS_LINE: &str = "- No rule-based signals triggered";

/// Refund decision recommended for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendedAction {
    BlockRefund,
    HoldRefund,
    Monitor,
}

impl RecommendedAction {
    pub fn for_order(order: &Order) -> Self {
        match order.risk_band() {
            RiskBand::High => Self::BlockRefund,
            RiskBand::Medium => Self::HoldRefund,
            RiskBand::Low => Self::Monitor,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::BlockRefund => "BLOCK REFUND & escalate to fraud team",
            Self::HoldRefund => "HOLD REFUND pending manual review",
            Self::Monitor => "MONITOR, no immediate action",
        }
    }
}

/// Rule-based signal lines for an order, in display order.
pub fn signal_lines(order: &Order) -> Vec<String> {
    let mut lines = Vec::new();

    if order.reason_category_mismatch {
        lines.push(format!(
            "- {REASON_MISMATCH_MARKER}: \"{}\" is an unusual return reason for {}",
            order.return_reason, order.category
        ));
    }

    if !order.fingerprint_match {
        let detail = order
            .fingerprint_mismatch_reason
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or("returned item does not match the shipped item");
        lines.push(format!("- {FINGERPRINT_MISMATCH_MARKER}: {detail}"));
    }

    if order.photo_verification_required {
        lines.push(format!(
            "- {PHOTO_VERIFICATION_MARKER}: possible wardrobing, hold until photos are checked"
        ));
    }

    if order.is_serial_returner() {
        lines.push(format!(
            "- {SERIAL_RETURNER_MARKER}: {} returns on record",
            order.return_count
        ));
    }

    lines
}

/// Synthesize the fallback analysis text for `order`.
pub fn fallback_summary(order: &Order) -> String {
    let mut signals = signal_lines(order);
    if signals.is_empty() {
        signals.push(NO_SIGNALS_LINE.to_string());
    }

    let probability = match order.risk_band() {
        RiskBand::High => "HIGH",
        RiskBand::Medium => "MODERATE",
        RiskBand::Low => "LOW",
    };

    format!(
        "FRAUD ANALYSIS: {order_id} (generated locally)\n\
         \n\
         Customer: {name} ({customer_id})\n\
         Risk Score: {score}/100\n\
         Return filed after: {gap} day(s)\n\
         Item value: {value:.2}\n\
         \n\
         Signals:\n\
         {signals}\n\
         \n\
         Assessment: {probability} fraud probability.\n\
         Recommended Action: {action}",
        order_id = order.order_id,
        name = order.customer_name,
        customer_id = order.customer_id,
        score = order.risk_score,
        gap = order.return_day_gap,
        value = order.order_value,
        signals = signals.join("\n"),
        action = RecommendedAction::for_order(order).text(),
    )
}
