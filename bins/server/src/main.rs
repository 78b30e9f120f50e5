//! Tallykit API Server
//!
//! Main entry point for the Tallykit calculator service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallykit_api::{AppState, create_router};
use tallykit_core::currency::CurrencyConverter;
use tallykit_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tallykit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Live rates with a per-base response cache
    let source = tallykit_rates::live_source(&config.rates);
    info!(
        base_url = %config.rates.base_url,
        timeout_ms = config.rates.timeout_ms,
        cache_ttl_secs = config.rates.cache_ttl_secs,
        "Live rate source configured"
    );

    let converter = CurrencyConverter::new(Arc::new(source)).with_timeout(config.rates.timeout());
    let state = AppState::new(converter, config.converter.debounce());

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
