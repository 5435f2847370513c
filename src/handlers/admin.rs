//! Admin portal handlers
//!
//! The review surface has no authentication layer; deployments are expected
//! to front these routes with their own access control.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::db::applications;
use crate::error::AppError;
use crate::models::{ApiResponse, DashboardStats, VendorApplication};
use crate::workflow::stats::compute_stats;

use super::AppState;

/// List all applications, newest first
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VendorApplication>>>, AppError> {
    let applications = applications::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::success(applications)))
}

/// Dashboard counters, recomputed from the full list on every request
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let applications = applications::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::success(compute_stats(&applications))))
}

/// Delete an application (administrative escape hatch)
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let deleted = applications::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Application"));
    }

    tracing::info!("Deleted application {}", id);

    Ok(Json(ApiResponse::success(serde_json::json!({
        "deleted": true,
        "id": id,
    }))))
}
