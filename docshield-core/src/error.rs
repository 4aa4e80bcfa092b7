//! Error types for DocShield operations

use thiserror::Error;

/// Storage collaborator errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Document not found: {id}")]
    NotFound { id: String },

    #[error("Write failed for document {id}: {reason}")]
    WriteFailed { id: String, reason: String },

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Input validation errors raised at the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all DocShield errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocShieldError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for DocShield operations.
pub type DocResult<T> = Result<T, DocShieldError>;

impl DocShieldError {
    /// Shorthand for a storage NotFound error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::Storage(StorageError::NotFound { id: id.into() })
    }

    /// Whether this is the distinguished NotFound condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }
}

// ============================================================================
// BOUNDARY ERROR KIND
// ============================================================================

/// Error category reported to the boundary layer.
///
/// A successful call has no kind; every failure maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The document id is absent in storage.
    NotFound,
    /// Storage or connectivity failure.
    Internal,
    /// The request itself is malformed.
    InvalidInput,
}

impl ErrorKind {
    /// HTTP status code conventionally used for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
            ErrorKind::InvalidInput => 400,
        }
    }

    /// Public message for this kind. Never includes internal details.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "document not found",
            ErrorKind::Internal => "something went wrong, try later",
            ErrorKind::InvalidInput => "cannot parse data, please check provided data",
        }
    }
}

impl From<&DocShieldError> for ErrorKind {
    fn from(err: &DocShieldError) -> Self {
        match err {
            DocShieldError::Storage(StorageError::NotFound { .. }) => ErrorKind::NotFound,
            DocShieldError::Validation(_) => ErrorKind::InvalidInput,
            DocShieldError::Storage(_) | DocShieldError::Config(_) => ErrorKind::Internal,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
