//! Query parameters for the order list endpoint.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/orders`.
///
/// Serialized by the client and deserialized by the stub service, so absent
/// fields are omitted from the wire entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl OrderQuery {
    /// Maximum orders returned per request.
    pub const MAX_LIMIT: usize = 500;

    /// Default orders returned per request.
    pub const DEFAULT_LIMIT: usize = 50;

    /// Base query of the fraud queue: flagged orders only, bounded.
    pub fn flagged(limit: usize) -> Self {
        Self {
            flagged_only: Some(true),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    /// Effective limit, clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn flagged_only(&self) -> bool {
        self.flagged_only.unwrap_or(false)
    }
}
