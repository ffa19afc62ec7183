//! Route handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::error::AppError;
use super::extract::Submission;
use super::AppState;
use crate::application::diagnostics::{
    ConfigCheck, CredentialCheck, DebugReport, Health, ServiceStatus,
};
use crate::application::inquiry_service::SubmissionResult;

/// `POST /submit`
pub async fn submit(
    State(state): State<AppState>,
    Submission(form): Submission,
) -> Result<Json<SubmissionResult>, AppError> {
    let result = state.inquiries.submit(form).await?;
    Ok(Json(result))
}

/// `OPTIONS /submit`
pub async fn preflight() -> impl IntoResponse {
    (
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "*"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
        ],
        Json(json!({ "status": "ok" })),
    )
}

pub async fn home(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.diagnostics.status().await)
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(state.diagnostics.health())
}

pub async fn config_test(State(state): State<AppState>) -> Json<ConfigCheck> {
    Json(state.diagnostics.config_check().await)
}

pub async fn debug(State(state): State<AppState>) -> Json<DebugReport> {
    Json(state.diagnostics.debug_report().await)
}

pub async fn check_credentials(
    State(state): State<AppState>,
) -> (StatusCode, Json<CredentialCheck>) {
    let check = state.diagnostics.check_credentials().await;
    let status = match check {
        CredentialCheck::Valid { .. } => StatusCode::OK,
        CredentialCheck::Missing { .. } => StatusCode::NOT_FOUND,
        CredentialCheck::InvalidJson { .. } | CredentialCheck::Failed { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(check))
}
