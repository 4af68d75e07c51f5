//! Wire models and DTOs shared by the dashboard client and the stub service.

pub mod analytics;
pub mod order;
pub mod query;
