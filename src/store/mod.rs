//! In-memory order store backing the stub Order Service.

pub mod aggregates;
pub mod seed;

use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::models::query::OrderQuery;

/// Orders held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: RwLock<Vec<Order>>,
}

impl OrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    /// Store filled with the deterministic sample data for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(seed::generate(seed, seed::SEED_ORDER_COUNT))
    }

    /// Copy of every order, in insertion order.
    pub async fn all(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Orders matching `query`, highest risk first, truncated to the query limit.
    pub async fn list(&self, query: &OrderQuery) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut matched: Vec<Order> = orders
            .iter()
            .filter(|o| matches_query(o, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.risk_score
                .cmp(&a.risk_score)
                .then_with(|| a.order_id.cmp(&b.order_id))
        });
        matched.truncate(query.limit());
        matched
    }

    pub async fn get(&self, order_id: &str) -> Result<Order, AppError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    /// Flagged and total order counts for a customer.
    pub async fn customer_history(&self, customer_id: &str) -> (usize, usize) {
        let orders = self.orders.read().await;
        orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .fold((0, 0), |(flagged, total), o| {
                (flagged + usize::from(o.is_flagged()), total + 1)
            })
    }

    /// Record an agent decision. Terminal decisions lock the order.
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        if !status.is_agent_decision() {
            return Err(AppError::Validation(format!(
                "Cannot set status to {status}"
            )));
        }

        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.is_locked {
            return Err(AppError::Conflict(format!(
                "Order {order_id} is locked as {}",
                order.status
            )));
        }

        let previous = order.status;
        order.status = status;
        order.is_locked = status.is_terminal();
        tracing::info!(
            order_id,
            previous = %previous,
            status = %status,
            locked = order.is_locked,
            "Order status changed"
        );
        Ok(order.clone())
    }
}

/// Check an order against the list filters.
fn matches_query(order: &Order, query: &OrderQuery) -> bool {
    if query.flagged_only() && !order.is_flagged() {
        return false;
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        if order.category != category {
            return false;
        }
    }
    if let Some(min_score) = query.min_score.filter(|s| *s > 0) {
        if order.risk_score < min_score {
            return false;
        }
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        let hit = [&order.customer_name, &order.order_id, &order.customer_id]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }
    true
}
