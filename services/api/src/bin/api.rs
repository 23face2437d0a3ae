//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{CsvVocabularySource, FsModelStore, InMemorySessionStore, SqliteAccountStore},
    config::Config,
    error::ApiError,
    web::{self, state::AppState},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let account_store = Arc::new(SqliteAccountStore::new(db_pool.clone()));
    info!("Running database migrations...");
    account_store.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        accounts: account_store,
        sessions: Arc::new(InMemorySessionStore::new()),
        models: Arc::new(FsModelStore::new(config.models_dir.clone())),
        vocabulary: Arc::new(CsvVocabularySource::new(config.crop_dataset_path.clone())),
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = web::app(app_state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
