use kfix::{
    api::{build_router, AppState},
    auth::IdentityClient,
    config::Config,
    store::{load_seed, InMemoryStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "kfix={},tower_http=info",
            config.observability.log_level
        ))
    });

    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting K-Fix v{}", env!("CARGO_PKG_VERSION"));

    // Seed the record store
    let seed = load_seed()?;
    tracing::info!(
        failures = seed.failures.len(),
        solutions = seed.solutions.len(),
        "Record store seeded"
    );
    let store = Arc::new(InMemoryStore::new(seed.failures, seed.solutions));

    // Initialize the identity client
    let identity = IdentityClient::new(&config.identity)?;
    tracing::info!(base_url = %config.identity.base_url, "Identity client initialized");

    // Create application state and build the router
    let app_state = AppState::new(
        store,
        identity,
        config.catalog.clone(),
        config.identity.clone(),
    );
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Failures:     http://{}/v1/failures", http_addr);
    tracing::info!("   Solutions:    http://{}/v1/solutions", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
