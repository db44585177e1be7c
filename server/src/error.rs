//! Error types for the todo service.
//!
//! # Design
//! `StoreError` is what the store signals; `ValidationError` is produced
//! before the store is ever called. `AppError` joins the two at the HTTP
//! seam and renders the JSON error body clients already understand:
//! `{"statusCode", "message", "error"}`.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live record has this id.
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Todo with ID \"{id}\" not found"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A request payload that failed one or more schema checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request: {}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Validation(ValidationError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => e.fmt(f),
            AppError::Validation(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), error = %self, "request rejected");
        let reason = status.canonical_reason().unwrap_or("Error");
        let message = match &self {
            AppError::Store(e) => json!(e.to_string()),
            AppError::Validation(e) => json!(e.messages()),
        };
        let body = json!({
            "statusCode": status.as_u16(),
            "message": message,
            "error": reason,
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_quotes_the_id() {
        let err = StoreError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), r#"Todo with ID "abc" not found"#);
    }

    #[test]
    fn app_error_status_codes() {
        let not_found: AppError = StoreError::NotFound("x".to_string()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: AppError = ValidationError::single("title must be a string").into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_display_joins_messages() {
        let err = ValidationError::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid request: a; b");
    }
}
