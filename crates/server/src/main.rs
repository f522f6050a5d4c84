use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verse_core::{
    create_resolver, load_config, load_corpus, validate_config, FavoritesStore,
    SqliteFavoritesStore,
};
use verse_server::api::create_router;
use verse_server::state::{spawn_journey_sweeper, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("VERSE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Recommender backend: {}", config.recommender.backend.as_str());
    info!("Database path: {:?}", config.database.path);

    // Load the verse corpus
    let corpus = load_corpus(&config).context("Failed to load verse corpus")?;
    info!("Corpus loaded with {} verses", corpus.len());

    // Create resolver
    let resolver = create_resolver(&config, Arc::clone(&corpus))
        .context("Failed to create recommendation resolver")?;
    info!(
        "Using recommender: {} (timeout {:?})",
        resolver.recommender_name(),
        resolver.recommend_timeout()
    );

    // Create SQLite favorites store
    let favorites: Arc<dyn FavoritesStore> = Arc::new(
        SqliteFavoritesStore::new(&config.database.path)
            .context("Failed to create favorites store")?,
    );
    info!("Favorites store initialized");

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create app state
    let state = Arc::new(AppState::new(
        config,
        Arc::new(resolver),
        corpus,
        favorites,
    ));
    spawn_journey_sweeper(Arc::clone(&state));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
