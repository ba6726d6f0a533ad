//! Error-to-response mapping for request handlers.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::QueryError;
use serde::{Deserialize, Serialize};

const INTERNAL_ERROR_MESSAGE: &str =
    "An unexpected error occurred while processing your request. Please try again later.";

/// Failures a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No record has the requested identifier.
    #[error("No {resource} with id '{id}' exists")]
    NotFound { resource: &'static str, id: String },

    /// A query parameter was outside its accepted domain.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    /// Anything else. The detail is logged, never sent to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string()),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Turns a handler panic into an opaque 500.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(%detail, "request handler panicked");
    AppError::Internal(detail).into_response()
}
