use std::sync::Arc;

use fraudlens::client::HttpOrderService;
use fraudlens::config::AppConfig;
use fraudlens::services::controller::{DashboardController, DashboardSnapshot};
use fraudlens::services::poller::Poller;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fraudlens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Starting FraudLens dashboard");

    let service = HttpOrderService::from_config(&config)?;
    let controller = Arc::new(DashboardController::new(
        Arc::new(service),
        config.order_limit,
    ));

    let poller = Poller::start(controller.clone(), config.poll_interval());
    let mut report = tokio::time::interval(config.poll_interval());

    loop {
        tokio::select! {
            _ = report.tick() => report_snapshot(&controller.snapshot().await),
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let ticks = poller.stop().await;
    tracing::info!(ticks, "FraudLens dashboard stopped");
    Ok(())
}

/// Log the headline numbers and the top of the fraud queue.
fn report_snapshot(snapshot: &DashboardSnapshot) {
    let Some(stats) = &snapshot.stats else {
        tracing::info!("Waiting for first dashboard refresh");
        return;
    };

    tracing::info!(
        flagged = stats.flagged_orders,
        total = stats.total_returns,
        fraud_rate = stats.fraud_rate,
        amount_at_risk = stats.amount_at_risk,
        amount_saved = stats.amount_saved,
        "Live alerts"
    );

    for order in snapshot.orders.iter().take(5) {
        tracing::info!(
            order_id = %order.order_id,
            customer = %order.customer_name,
            category = %order.category,
            risk_score = order.risk_score,
            risk_band = ?order.risk_band(),
            status = %order.status,
            locked = order.is_locked,
            "Fraud queue"
        );
    }
}
