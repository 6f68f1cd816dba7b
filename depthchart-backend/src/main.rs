use anyhow::Context;
use depthchart_backend::{RateLimitConfig, config, create_app, loader};
use depthchart_store::DepthChartStore;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for structured logging
    #[cfg(debug_assertions)]
    let log_level = tracing::Level::DEBUG;
    #[cfg(not(debug_assertions))]
    let log_level = tracing::Level::INFO;

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();
    tracing::info!("Starting depth chart server...");

    // Load configuration from environment variables or use defaults
    let config = config::Config::from_env();
    tracing::info!(
        "Configuration: port={}, catalog={}, data_dir={}, body_limit={}KB, timeout={}s",
        config.port,
        config.catalog_path,
        config.data_dir,
        config.request_body_limit / 1024,
        config.request_timeout.as_secs(),
    );
    tracing::info!(
        "Rate limits: write={}/sec (burst {}), read={}/sec (burst {})",
        config.rate_limit_write_per_sec,
        config.rate_limit_write_burst,
        config.rate_limit_read_per_sec,
        config.rate_limit_read_burst,
    );

    let catalog = config::load_catalog(&config.catalog_path)
        .await
        .with_context(|| format!("loading league catalog from {}", config.catalog_path))?;
    let store = DepthChartStore::new(catalog);

    let summary = loader::load_dir(&store, &config.data_dir).await;
    tracing::info!(
        "Bulk load finished: {} files, {} players, {} skipped",
        summary.files,
        summary.players,
        summary.skipped
    );

    let app = create_app(
        store,
        config.request_body_limit,
        config.request_timeout,
        Some(RateLimitConfig::from(&config)),
    );
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await {
        tracing::error!(error = %e, "Server stopped with an error");
        return Err(e.into());
    }
    Ok(())
}
