//! HTTP error responses for the inquiry endpoints.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::domain::submission::{ValidationError, MISSING_FIELDS_MESSAGE};

#[derive(Debug)]
pub enum AppError {
    /// Required form fields were left blank.
    Validation(ValidationError),
    /// Anything else; the message is returned to the caller as-is.
    Internal(String),
}

impl AppError {
    pub fn internal(e: impl std::fmt::Display) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<Vec<&'static str>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(ValidationError { missing }) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    success: false,
                    error: MISSING_FIELDS_MESSAGE.to_string(),
                    missing_fields: Some(missing),
                }),
            )
                .into_response(),
            AppError::Internal(message) => {
                error!("❌ Server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        success: false,
                        error: message,
                        missing_fields: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Converts a handler panic into the regular 500 body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    AppError::Internal(message).into_response()
}
