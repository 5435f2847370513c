//! Application handlers for the applicant portal

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::applications;
use crate::error::AppError;
use crate::models::{
    ApiResponse, ApplicationStatus, CreateApplication, SubmissionChecklist, UpdateApplication,
    VendorApplication,
};
use crate::validation::missing_required_fields;
use crate::workflow;
use crate::workflow::codes::generate_application_code;

use super::AppState;

// =============================================================================
// Application Endpoints
// =============================================================================

/// Create a new application
///
/// The server assigns the application code and creation timestamp. The
/// requested initial status (normally `draft` for save-and-continue or
/// `pending_review` for a direct submit) is normalized case-insensitively
/// and defaults to draft.
pub async fn create_application(
    State(state): State<AppState>,
    Json(input): Json<CreateApplication>,
) -> Result<impl IntoResponse, AppError> {
    input
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let status = input
        .status
        .as_deref()
        .and_then(ApplicationStatus::normalize)
        .unwrap_or(ApplicationStatus::Draft);

    let code = generate_application_code(
        input.application_code.as_deref(),
        Some(&input.company_name),
    );

    let created =
        applications::create(&state.pool, &code, status, input.approved_date, &input).await;

    match created {
        Ok(application) => {
            tracing::info!(
                "Created application {} ({})",
                application.application_code,
                application.id
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(application)),
            ))
        }
        Err(e) if is_unique_violation(&e) => Err(AppError::validation(
            "An application with this code already exists",
        )),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub code: Option<String>,
    pub email: Option<String>,
}

/// Unauthenticated status lookup by application code + contact email
///
/// Both parameters are required together; a matching code with the wrong
/// email reads the same as an unknown code.
pub async fn lookup_application(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<VendorApplication>>, AppError> {
    let (code, email) = match (query.code.as_deref(), query.email.as_deref()) {
        (Some(code), Some(email)) => (code, email),
        (Some(_), None) => {
            return Err(AppError::validation(
                "Email is required when querying by application code",
            ))
        }
        (None, Some(_)) => {
            return Err(AppError::validation(
                "Application code is required when querying by email",
            ))
        }
        (None, None) => {
            return Err(AppError::validation(
                "Application code and email are required",
            ))
        }
    };

    let application = applications::get_by_code_and_email(&state.pool, code, email)
        .await?
        .ok_or(AppError::NotFound("Application"))?;

    Ok(Json(ApiResponse::success(application)))
}

/// Get application by id
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VendorApplication>>, AppError> {
    let application = applications::get_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Application"))?;

    Ok(Json(ApiResponse::success(application)))
}

/// Partially update an application
///
/// Status changes run through the workflow core, so rejecting without a
/// reason fails here without touching the database, and the approval date
/// is stamped or cleared in the same row write as the status itself.
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateApplication>,
) -> Result<Json<ApiResponse<VendorApplication>>, AppError> {
    let mut application = applications::get_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Application"))?;

    workflow::apply_update(&mut application, &patch, Utc::now())?;

    let updated = applications::update(&state.pool, &application)
        .await?
        .ok_or(AppError::NotFound("Application"))?;

    tracing::info!(
        "Updated application {} (status {:?})",
        updated.application_code,
        updated.status
    );

    Ok(Json(ApiResponse::success(updated)))
}

/// Submission-eligibility report
///
/// Advisory only: lists the required fields still blank for the
/// application's vendor type without blocking submission.
pub async fn submission_checklist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmissionChecklist>>, AppError> {
    let application = applications::get_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Application"))?;

    let missing_fields = missing_required_fields(&application);

    Ok(Json(ApiResponse::success(SubmissionChecklist {
        vendor_type: application.vendor_type,
        editable: application.status.applicant_editable(),
        ready: missing_fields.is_empty(),
        missing_fields,
    })))
}
