//! Boundary error type.
//!
//! `ApiError` is what callers outside the service see. It carries the
//! [`ErrorKind`] used to pick a response and a public message that never
//! includes storage internals.

use std::fmt;

use docshield_core::{DocShieldError, ErrorKind};
use serde::Serialize;

/// Error returned by every [`DocumentApi`](crate::api::DocumentApi) operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Category used to select the response.
    #[serde(skip)]
    pub kind: ErrorKind,

    /// Public, non-leaking message.
    #[serde(rename = "error")]
    pub message: String,
}

/// Result type alias for boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Create an error with the default message for `kind`.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }

    /// Create an error with a custom message.
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }

    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// JSON body for this error, `{"error": "<message>"}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<DocShieldError> for ApiError {
    fn from(err: DocShieldError) -> Self {
        Self::new(ErrorKind::from(&err))
    }
}
