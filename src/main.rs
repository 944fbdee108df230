//! SmartMine Backend
//!
//! REST backend tracking mining equipment usage and maintenance, with SQLite persistence
//! and health status derived from usage on every read.

mod api;
mod config;
mod db;
mod errors;
mod health;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Starting SmartMine Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let equipment_count = repo.count_equipment().await?;
    tracing::info!("Database holds {} equipment records", equipment_count);

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = match &state.config.cors_origin {
        Some(origin) => CorsLayer::new().allow_origin(origin.clone()),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Equipment
        .route(
            "/equipment",
            get(api::list_equipment).post(api::create_equipment),
        )
        .route(
            "/equipment/{id}",
            get(api::get_equipment)
                .put(api::update_equipment)
                .delete(api::delete_equipment),
        )
        .route(
            "/equipment/{id}/update-hours",
            post(api::update_equipment_hours),
        )
        // Maintenance
        .route(
            "/maintenance",
            get(api::list_maintenance).post(api::create_maintenance),
        )
        // Derived views
        .route("/alerts", get(api::list_alerts))
        .route("/dashboard-summary", get(api::dashboard_summary))
        // Sample data
        .route("/seed", post(api::seed_data));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Landing endpoint.
async fn home() -> &'static str {
    "SmartMine backend is running"
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
