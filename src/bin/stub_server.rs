//! Stub Order Service for development: serves the dashboard REST contract
//! from seeded in-memory data.
//!
//! Usage: `cargo run --bin fraudlens-stub`
//!
//! Reads `STUB_HOST`, `STUB_PORT`, and `STUB_SEED` (and `.env`).

use std::net::SocketAddr;

use fraudlens::config::AppConfig;
use fraudlens::store::OrderStore;
use fraudlens::AppState;
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

    let store = OrderStore::seeded(config.stub_seed);
    let flagged = store
        .all()
        .await
        .iter()
        .filter(|o| o.is_flagged())
        .count();
    tracing::info!(seed = config.stub_seed, flagged, "Seeded order store");

    let addr: SocketAddr = format!("{}:{}", config.stub_host, config.stub_port).parse()?;
    tracing::info!(host = %addr, "Starting FraudLens stub Order Service");

    let app = fraudlens::routes::router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
