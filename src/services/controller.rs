//! Dashboard controller: owns the view state and mediates the review workflow.
//!
//! All state lives in one `ViewState` behind a lock. Readers receive cloned
//! snapshots; every mutation goes through a method on the controller.
//! Network failures never escape as panics. They either leave the last
//! known good state in place or close the active review.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::OrderService;
use crate::errors::ClientError;
use crate::models::analytics::{CategoryStat, CityStat, DashboardStats, TrendPoint};
use crate::models::order::{Order, OrderStatus};
use crate::models::query::OrderQuery;
use crate::services::filter::FilterSelector;
use crate::services::review::{self, ReviewPhase, ReviewSession, SummaryState};
use crate::services::summary;

/// Everything the dashboard renders outside the review view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: Option<DashboardStats>,
    pub orders: Vec<Order>,
    pub trends: Vec<TrendPoint>,
    pub categories: Vec<CategoryStat>,
    pub cities: Vec<CityStat>,
    pub search: String,
    pub filter: FilterSelector,
}

impl DashboardSnapshot {
    /// Whether at least one refresh has been committed.
    pub fn is_loaded(&self) -> bool {
        self.stats.is_some()
    }

    /// Query for the order list implied by the active search or filter.
    ///
    /// Search and filter are exclusive: setting one resets the other.
    pub fn order_query(&self, limit: usize) -> OrderQuery {
        let base = OrderQuery::flagged(limit);
        if self.search.trim().is_empty() {
            self.filter.apply(base)
        } else {
            base.with_search(&self.search)
        }
    }
}

/// Why a status update was refused without contacting the Order Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Another update from this controller has not finished.
    InFlight,
    /// The order carries a recorded decision.
    Locked,
    /// The order is not the one open in the review view.
    NotSelected,
    /// The requested status is not an agent decision.
    InvalidTarget,
}

/// Result of `update_status`.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The Order Service accepted the change; carries its representation.
    Applied(Order),
    /// The change failed but the order was re-fetched.
    Resynced { order: Order, error: ClientError },
    /// The change and the resync both failed; the review was closed.
    Closed { error: ClientError },
    /// No request was issued.
    Rejected(RejectReason),
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

#[derive(Debug, Default)]
struct ViewState {
    dashboard: DashboardSnapshot,
    review: ReviewSession,
}

impl ViewState {
    fn move_review(&mut self, to: ReviewPhase) {
        let from = self.review.phase;
        debug_assert!(
            review::is_valid_transition(from, to),
            "invalid review transition {from:?} -> {to:?}"
        );
        tracing::debug!(?from, ?to, order_id = ?self.review.selected_id(), "Review transition");
        self.review.phase = to;
    }

    fn close_review(&mut self) {
        self.move_review(ReviewPhase::Closed);
        self.review.order = None;
        self.review.summary = None;
    }
}

/// Clears the in-flight flag when the update finishes, however it finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Dashboard controller over an Order Service.
pub struct DashboardController {
    service: Arc<dyn OrderService>,
    order_limit: usize,
    state: RwLock<ViewState>,
    update_in_flight: AtomicBool,
}

impl DashboardController {
    pub fn new(service: Arc<dyn OrderService>, order_limit: usize) -> Self {
        Self {
            service,
            order_limit: order_limit.clamp(1, OrderQuery::MAX_LIMIT),
            state: RwLock::new(ViewState::default()),
            update_in_flight: AtomicBool::new(false),
        }
    }

    /// Copy of the dashboard state.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.dashboard.clone()
    }

    /// Copy of the review session.
    pub async fn review(&self) -> ReviewSession {
        self.state.read().await.review.clone()
    }

    pub fn is_update_in_flight(&self) -> bool {
        self.update_in_flight.load(Ordering::Acquire)
    }

    /// Fetch every dashboard dataset concurrently and commit them together.
    ///
    /// Any failure commits nothing and leaves the previous snapshot visible.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let query = self.state.read().await.dashboard.order_query(self.order_limit);
        let service = self.service.as_ref();

        let result = tokio::try_join!(
            service.stats(),
            service.orders(&query),
            service.trends(),
            service.categories(),
            service.cities(),
        );

        match result {
            Ok((stats, orders, trends, categories, cities)) => {
                let mut state = self.state.write().await;
                let dashboard = &mut state.dashboard;
                dashboard.stats = Some(stats);
                dashboard.orders = orders;
                dashboard.trends = trends;
                dashboard.categories = categories;
                dashboard.cities = cities;
                tracing::debug!(orders = dashboard.orders.len(), "Dashboard refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard refresh failed, keeping last known state");
                Err(e)
            }
        }
    }

    /// Re-fetch the order list with a server-side text filter.
    pub async fn search(&self, term: &str) -> Result<(), ClientError> {
        let query = {
            let mut state = self.state.write().await;
            state.dashboard.search = term.to_string();
            state.dashboard.filter = FilterSelector::All;
            state.dashboard.order_query(self.order_limit)
        };
        self.reload_orders(&query).await
    }

    /// Re-fetch the order list for a named filter (`all`, `high`, `medium`, or a category).
    pub async fn filter(&self, selector: impl Into<FilterSelector>) -> Result<(), ClientError> {
        let query = {
            let mut state = self.state.write().await;
            state.dashboard.filter = selector.into();
            state.dashboard.search.clear();
            state.dashboard.order_query(self.order_limit)
        };
        self.reload_orders(&query).await
    }

    async fn reload_orders(&self, query: &OrderQuery) -> Result<(), ClientError> {
        match self.service.orders(query).await {
            Ok(orders) => {
                self.state.write().await.dashboard.orders = orders;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, ?query, "Order list reload failed");
                Err(e)
            }
        }
    }

    /// Open the review view for `order` and load its fraud summary.
    ///
    /// Falls back to a locally synthesized summary when the Order Service
    /// cannot provide one. A late summary is not applied to state once the
    /// review was closed or another order was selected; it is only returned.
    pub async fn select_order(&self, order: Order) -> SummaryState {
        let order_id = order.order_id.clone();
        {
            let mut state = self.state.write().await;
            state.move_review(ReviewPhase::Viewing);
            state.review.order = Some(order.clone());
            state.review.summary = Some(SummaryState::Loading);
        }

        let summary = match self.service.fraud_summary(&order_id).await {
            Ok(remote) => SummaryState::Remote(remote.summary),
            Err(e) => {
                tracing::warn!(error = %e, order_id = %order_id, "Fraud summary unavailable, using local analysis");
                SummaryState::Fallback(summary::fallback_summary(&order))
            }
        };

        let mut state = self.state.write().await;
        if state.review.is_open() && state.review.selected_id() == Some(order_id.as_str()) {
            state.review.summary = Some(summary.clone());
        }
        summary
    }

    /// Close the review view. Outstanding requests are not cancelled.
    pub async fn close_review(&self) {
        self.state.write().await.close_review();
    }

    /// Request a status change for the order open in the review view.
    ///
    /// Only one status request runs at a time; the refresh that follows a
    /// success runs outside that guard. If the review moved to another order
    /// while the request was pending, the result is returned but the review
    /// view is left alone.
    pub async fn update_status(&self, order_id: &str, new_status: OrderStatus) -> UpdateOutcome {
        let Some(guard) = InFlightGuard::acquire(&self.update_in_flight) else {
            tracing::debug!(order_id, "Status update rejected, another update is in flight");
            return UpdateOutcome::Rejected(RejectReason::InFlight);
        };

        if !new_status.is_agent_decision() {
            return UpdateOutcome::Rejected(RejectReason::InvalidTarget);
        }

        {
            let mut state = self.state.write().await;
            let review = &state.review;
            if review.phase != ReviewPhase::Viewing || review.selected_id() != Some(order_id) {
                return UpdateOutcome::Rejected(RejectReason::NotSelected);
            }
            if review.is_locked() {
                tracing::info!(order_id, "Status update rejected, order is locked");
                return UpdateOutcome::Rejected(RejectReason::Locked);
            }
            state.move_review(ReviewPhase::Updating);
        }

        match self.service.update_status(order_id, new_status).await {
            Ok(updated) => {
                {
                    let mut state = self.state.write().await;
                    if state.review.selected_id() == Some(order_id) {
                        state.review.order = Some(updated.clone());
                        state.move_review(ReviewPhase::Viewing);
                    }
                }
                tracing::info!(order_id, status = %updated.status, locked = updated.is_locked, "Order status updated");
                // The guard covers the status request only, not the follow-up refresh.
                drop(guard);
                // The refresh result is already logged and must not undo the update.
                let _ = self.refresh().await;
                UpdateOutcome::Applied(updated)
            }
            Err(error) => {
                tracing::warn!(error = %error, order_id, "Status update failed, resynchronizing order");
                self.resync(order_id, error).await
            }
        }
    }

    async fn resync(&self, order_id: &str, error: ClientError) -> UpdateOutcome {
        match self.service.order(order_id).await {
            Ok(order) => {
                let mut state = self.state.write().await;
                if state.review.selected_id() == Some(order_id) {
                    state.review.order = Some(order.clone());
                    state.move_review(ReviewPhase::Viewing);
                }
                UpdateOutcome::Resynced { order, error }
            }
            Err(resync_error) => {
                tracing::warn!(error = %resync_error, order_id, "Resync failed, closing review");
                let mut state = self.state.write().await;
                if state.review.selected_id() == Some(order_id) {
                    state.close_review();
                }
                UpdateOutcome::Closed {
                    error: resync_error,
                }
            }
        }
    }
}
