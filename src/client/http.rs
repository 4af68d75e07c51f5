//! `reqwest` implementation of the Order Service contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::OrderService;
use crate::config::AppConfig;
use crate::errors::ClientError;
use crate::models::analytics::{CategoryStat, CityStat, DashboardStats, TrendPoint};
use crate::models::order::{FraudSummary, Order, OrderStatus, StatusUpdateRequest};
use crate::models::query::OrderQuery;

/// JSON-over-HTTP client for the Order Service.
#[derive(Debug, Clone)]
pub struct HttpOrderService {
    http: Client,
    base: Url,
}

impl HttpOrderService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(&config.api_url, config.http_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        send(self.request(Method::GET, segments)?).await
    }
}

/// Send a request and decode a JSON body, mapping non-2xx answers to `ClientError::Status`.
async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(ClientError::from_status(
            status.as_u16(),
            &String::from_utf8_lossy(&body),
        ));
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn stats(&self) -> Result<DashboardStats, ClientError> {
        self.get(&["api", "stats"]).await
    }

    async fn orders(&self, query: &OrderQuery) -> Result<Vec<Order>, ClientError> {
        send(self.request(Method::GET, &["api", "orders"])?.query(query)).await
    }

    async fn order(&self, order_id: &str) -> Result<Order, ClientError> {
        self.get(&["api", "orders", order_id]).await
    }

    async fn fraud_summary(&self, order_id: &str) -> Result<FraudSummary, ClientError> {
        self.get(&["api", "fraud-summary", order_id]).await
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, ClientError> {
        tracing::debug!(order_id, status = %status, "Requesting status update");
        let request = self
            .request(Method::PATCH, &["api", "orders", order_id, "status"])?
            .json(&StatusUpdateRequest { status });
        send(request).await
    }

    async fn trends(&self) -> Result<Vec<TrendPoint>, ClientError> {
        self.get(&["api", "trends"]).await
    }

    async fn categories(&self) -> Result<Vec<CategoryStat>, ClientError> {
        self.get(&["api", "categories"]).await
    }

    async fn cities(&self) -> Result<Vec<CityStat>, ClientError> {
        self.get(&["api", "cities"]).await
    }
}
