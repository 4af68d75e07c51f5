//! Periodic dashboard refresh bound to an explicit start/stop lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::controller::DashboardController;

/// Handle to a running refresh loop. Dropping it aborts the loop.
#[derive(Debug)]
pub struct Poller {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<u64>>,
}

impl Poller {
    /// Spawn a task that refreshes `controller` every `period`, starting immediately.
    pub fn start(controller: Arc<DashboardController>, period: Duration) -> Self {
        let (shutdown, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = 0u64;

            loop {
                tokio::select! {
                    biased;
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        ticks += 1;
                        // Failures are logged by the controller; the next tick retries.
                        let _ = controller.refresh().await;
                    }
                }
            }

            tracing::debug!(ticks, "Dashboard poller stopped");
            ticks
        });

        tracing::info!(period_secs = period.as_secs_f64(), "Dashboard poller started");
        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop to stop and wait for it. Returns the number of refresh ticks run.
    ///
    /// A refresh already underway is allowed to finish and commit.
    pub async fn stop(mut self) -> u64 {
        let _ = self.shutdown.send(true);
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or(0),
            None => 0,
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
