//! DocShield Core - Document Types and Sanitization
//!
//! Pure data structures and pure functions. All other crates depend on this.
//! This crate performs no I/O and holds no shared state.

pub mod config;
pub mod entities;
pub mod error;
pub mod page;
pub mod sanitize;

pub use config::{ServiceConfig, DEFAULT_CACHE_TTL, DEFAULT_MAX_WORKERS};
pub use entities::{Document, Level1Item, Level2Item};
pub use error::{
    ConfigError, DocResult, DocShieldError, ErrorKind, StorageError, ValidationError,
};
pub use page::{PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use sanitize::{deep_copy, sanitize_and_sort};

use uuid::Uuid;

// ============================================================================
// IDENTITY
// ============================================================================

/// Document identifier. Opaque string, assigned once at creation time.
pub type DocumentId = String;

/// Generate a new document id.
///
/// Ids are UUIDv7 strings, so they sort by creation time.
pub fn new_document_id() -> DocumentId {
    Uuid::now_v7().to_string()
}

// ============================================================================
// TESTS
// ============================================================================
