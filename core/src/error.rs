//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a view treats it as "the
//! record no longer exists" and drops it. A 400 carries the server's list of
//! violated constraints. Every other non-2xx response lands in `HttpError`
//! with the raw status code and body for debugging.

use std::fmt;

/// Shown to users for any failure other than `NotFound`.
pub const GENERIC_USER_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    NotFound,

    /// The server rejected the payload (400) with these violations.
    Validation(Vec<String>),

    /// The server returned a non-2xx status not covered above.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl ApiError {
    /// True when the record should be removed from any local view.
    pub fn is_gone(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "This todo no longer exists.",
            _ => GENERIC_USER_MESSAGE,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Validation(messages) => {
                write!(f, "validation failed: {}", messages.join("; "))
            }
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
