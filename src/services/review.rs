//! Review session state machine for a single selected order.
//!
//! Unselected -> Viewing -> Updating -> Viewing (updated or resynced)
//!                                   \-> Closed  (resync failed)
//! Any state may be closed explicitly, and a new selection re-enters Viewing.

use crate::models::order::Order;

/// Phase of the review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPhase {
    Unselected,
    Viewing,
    Updating,
    Closed,
}

/// Fraud summary shown in the review view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Loading,
    /// Returned by the Order Service.
    Remote(String),
    /// Synthesized locally after the remote fetch failed.
    Fallback(String),
}

impl SummaryState {
    pub fn text(&self) -> &str {
        match self {
            Self::Loading => "Loading analysis...",
            Self::Remote(text) | Self::Fallback(text) => text,
        }
    }
}

/// Read-only view of the review session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    pub phase: ReviewPhase,
    pub order: Option<Order>,
    pub summary: Option<SummaryState>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self {
            phase: ReviewPhase::Unselected,
            order: None,
            summary: None,
        }
    }
}

impl ReviewSession {
    pub fn is_open(&self) -> bool {
        matches!(self.phase, ReviewPhase::Viewing | ReviewPhase::Updating)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.order.as_ref().map(|o| o.order_id.as_str())
    }

    /// Whether the open review may leave Viewing for anything but Closed.
    pub fn is_locked(&self) -> bool {
        self.order.as_ref().is_some_and(Order::is_review_locked)
    }
}

/// Check whether a phase change is valid per the review graph.
pub fn is_valid_transition(from: ReviewPhase, to: ReviewPhase) -> bool {
    matches!(
        (from, to),
        (ReviewPhase::Unselected, ReviewPhase::Viewing)
            | (ReviewPhase::Viewing, ReviewPhase::Viewing)
            | (ReviewPhase::Closed, ReviewPhase::Viewing)
            | (ReviewPhase::Viewing, ReviewPhase::Updating)
            | (ReviewPhase::Updating, ReviewPhase::Viewing)
            | (ReviewPhase::Updating, ReviewPhase::Closed)
            | (_, ReviewPhase::Closed)
    )
}
