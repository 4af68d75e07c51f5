//! Fraud queue filter selectors and their mapping to order query parameters.

use crate::models::order::{FLAG_THRESHOLD, HIGH_RISK_THRESHOLD};
use crate::models::query::OrderQuery;

/// Named filter chosen from the fraud queue toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelector {
    #[default]
    All,
    /// Risk score >= 85.
    High,
    /// Risk score >= 70.
    Medium,
    /// A literal category name.
    Category(String),
}

impl FilterSelector {
    /// Parse a toolbar selector. Anything other than the reserved names is a category.
    pub fn parse(selector: &str) -> Self {
        match selector.trim() {
            "" | "all" => Self::All,
            "high" => Self::High,
            "medium" => Self::Medium,
            category => Self::Category(category.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Category(name) => name,
        }
    }

    /// Apply this selector's parameters on top of `base`.
    pub fn apply(&self, mut base: OrderQuery) -> OrderQuery {
        match self {
            Self::All => {}
            Self::High => base.min_score = Some(HIGH_RISK_THRESHOLD),
            Self::Medium => base.min_score = Some(FLAG_THRESHOLD),
            Self::Category(name) => base.category = Some(name.clone()),
        }
        base
    }
}

impl From<&str> for FilterSelector {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
