//! Order Service client: the trait the dashboard depends on and its HTTP implementation.

pub mod http;

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::analytics::{CategoryStat, CityStat, DashboardStats, TrendPoint};
use crate::models::order::{FraudSummary, Order, OrderStatus};
use crate::models::query::OrderQuery;

pub use http::HttpOrderService;

/// Read and status-update operations of the Order Service REST contract.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// GET /api/stats
    async fn stats(&self) -> Result<DashboardStats, ClientError>;

    /// GET /api/orders
    async fn orders(&self, query: &OrderQuery) -> Result<Vec<Order>, ClientError>;

    /// GET /api/orders/{id}
    async fn order(&self, order_id: &str) -> Result<Order, ClientError>;

    /// GET /api/fraud-summary/{id}
    async fn fraud_summary(&self, order_id: &str) -> Result<FraudSummary, ClientError>;

    /// PATCH /api/orders/{id}/status
    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, ClientError>;

    /// GET /api/trends
    async fn trends(&self) -> Result<Vec<TrendPoint>, ClientError>;

    /// GET /api/categories
    async fn categories(&self) -> Result<Vec<CategoryStat>, ClientError>;

    /// GET /api/cities
    async fn cities(&self) -> Result<Vec<CityStat>, ClientError>;
}
