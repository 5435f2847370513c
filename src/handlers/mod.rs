//! HTTP request handlers

pub mod admin;
pub mod applications;
pub mod uploads;

use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgPool;

use crate::models::ApiResponse;
use crate::storage::FileStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub files: FileStore,
    pub max_upload_size: usize,
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "status": "ok",
        "service": "vendor-onboarding",
        "timestamp": chrono::Utc::now(),
    })))
}

pub use admin::*;
pub use applications::*;
pub use uploads::*;
