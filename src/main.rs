use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutor_finder::{
    api::{build_router, AppState},
    config::Config,
    identity::StaticIdentity,
    search::SearchService,
    store::{DirectoryStore, InMemoryStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutor_finder=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    tracing::info!("Starting Tutor Finder v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the directory store
    let store: Arc<dyn DirectoryStore> = match config.data.seed_path.as_deref() {
        Some(path) => {
            let store = InMemoryStore::from_seed_file(path)?;
            tracing::info!(teachers = store.teacher_count(), "Directory store seeded");
            Arc::new(store)
        }
        None => {
            tracing::warn!("No seed path configured; starting with an empty directory");
            Arc::new(InMemoryStore::new())
        }
    };

    // Initialize the search service
    let service = Arc::new(SearchService::new(store.clone(), config.search.clone()));
    tracing::info!(
        roster_limit = config.search.roster_limit,
        page_size = config.search.page_size,
        "Search service initialized"
    );

    let identity = Arc::new(StaticIdentity::new());

    // Build HTTP router
    let app_state = AppState::new(service, store, identity);
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Browse API:   http://{}/v1/teachers", http_addr);

    tokio::select! {
        result = axum::serve(http_listener, app) => {
            if let Err(e) = result {
                tracing::error!("HTTP server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
