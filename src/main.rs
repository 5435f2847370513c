//! Vendor Onboarding Service
//!
//! HTTP JSON API for vendor onboarding: prospective vendors submit a
//! structured application with supporting documents, administrators review
//! and move it through the status workflow.
//!
//! ## Features
//!
//! - **Applicant API**: create and update applications, upload documents,
//!   unauthenticated status lookup by application code + email
//! - **Admin API**: list applications, review transitions, dashboard stats

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod storage;
mod validation;
mod workflow;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use handlers::AppState;
use std::path::PathBuf;
use storage::FileStore;
use tokio::fs;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendor_onboarding=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Starting Vendor Onboarding Service");
    tracing::info!("Environment: {:?}", config.environment);

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // Ensure upload directory exists
    let upload_dir = PathBuf::from(&config.upload_dir);
    fs::create_dir_all(&upload_dir).await?;
    tracing::info!("Upload directory: {:?}", upload_dir);

    // Create application state
    let state = AppState {
        pool: pool.clone(),
        files: FileStore::new(upload_dir.clone()),
        max_upload_size: config.max_upload_size,
    };

    // Build CORS layer
    let cors = if config.is_production() {
        CorsLayer::new()
            .allow_origin(
                config
                    .cors_origins
                    .iter()
                    .filter_map(|o| o.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::permissive()
    };

    // Build API routes
    let api_routes = Router::new()
        // Applicant endpoints
        .route("/applications", post(handlers::create_application))
        .route("/applications/lookup", get(handlers::lookup_application))
        .route("/applications/:id", get(handlers::get_application))
        .route("/applications/:id", patch(handlers::update_application))
        .route(
            "/applications/:id/checklist",
            get(handlers::submission_checklist),
        )
        .route("/uploads", post(handlers::upload_document))
        // Admin endpoints
        .route("/admin/applications", get(handlers::list_applications))
        .route(
            "/admin/applications/:id",
            delete(handlers::delete_application),
        )
        .route("/admin/stats", get(handlers::dashboard_stats))
        // Liveness
        .route("/health", get(handlers::health));

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .nest_service(storage::PUBLIC_PREFIX, ServeDir::new(&upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size))
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
