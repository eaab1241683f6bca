//! RateHub Server Binary
//!
//! Wires the stores, the rate cache, the provider client, and the refresh
//! task together and serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratehub_common::CurrencyCode;
use ratehub_fx::{HttpRateProvider, RateCache, RateRefresher};
use ratehub_server::{http, ExchangeService, ServerConfig};
use ratehub_store::{InMemoryCurrencyStore, InMemoryRateLogStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting RateHub server");

    // Load configuration
    let config = ServerConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let base_currency = CurrencyCode::new(&config.base_currency)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Assemble collaborators
    let currencies = Arc::new(InMemoryCurrencyStore::new());
    let rate_log = Arc::new(InMemoryRateLogStore::new());
    let provider = Arc::new(HttpRateProvider::new(
        config.provider.api_url.clone(),
        config.provider.api_key.clone(),
    ));
    let cache = Arc::new(RateCache::new());

    // Start the refresh task
    let refresher = RateRefresher::new(
        currencies.clone(),
        rate_log,
        provider,
        cache.clone(),
        base_currency.clone(),
        config.refresh_interval,
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher_task = tokio::spawn(async move { refresher.run(shutdown_rx).await });

    // Serve the API
    let service = Arc::new(ExchangeService::new(currencies, cache));
    let app = http::router(service);

    let addr = format!("{}:{}", config.listen_addr, config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        addr = %addr,
        base = %base_currency,
        refresh_interval_secs = config.refresh_interval.as_secs(),
        "RateHub server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    // Stop the refresher; an in-flight tick is allowed to finish.
    let _ = shutdown_tx.send(true);
    let _ = refresher_task.await;

    info!("RateHub server stopped");
    Ok(())
}
