//! Document upload handler
//!
//! Accepts a single multipart file, validates it, and hands it to the file
//! store. The returned URL is what applicants attach to their document
//! fields; the record itself is updated separately.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::AppError;
use crate::models::{ApiResponse, UploadResponse};
use crate::validation::{validate_file_upload, validate_filename_extensions};

use super::AppState;

/// Store an uploaded vendor document and return its URL
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| {
            tracing::warn!("Multipart parsing error: {}", e);
            AppError::validation(friendly_multipart_error(&e))
        })?
        .ok_or_else(|| AppError::validation("No file provided"))?;

    let original_filename = field.file_name().unwrap_or("file").to_string();
    let declared_mime = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field.bytes().await.map_err(|e| {
        tracing::warn!("Failed to read file bytes: {}", e);
        AppError::validation(friendly_multipart_error(&e))
    })?;

    validate_filename_extensions(&original_filename)?;
    validate_file_upload(&declared_mime, &data, state.max_upload_size)?;

    let stored = state.files.store(&data, &original_filename).await?;

    tracing::info!(
        "Stored document {} ({} bytes) as {}",
        original_filename,
        data.len(),
        stored.url
    );

    Ok(Json(ApiResponse::success(UploadResponse {
        file_url: stored.url,
    })))
}

fn friendly_multipart_error(err: &axum::extract::multipart::MultipartError) -> String {
    let detail = err.to_string();
    if detail.contains("length limit") {
        "File too large".to_string()
    } else {
        format!("Failed to process upload: {}", detail)
    }
}
