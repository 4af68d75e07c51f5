pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use store::OrderStore;

/// Shared state passed to all Axum handlers of the stub Order Service.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<OrderStore>,
}

impl AppState {
    pub fn new(store: OrderStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
