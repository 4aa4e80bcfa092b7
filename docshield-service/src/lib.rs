//! DocShield Service - Cached, Sanitized Document Access
//!
//! Sits between a boundary layer and a storage collaborator. Reads by id go
//! through a TTL cache of sanitized documents; bulk listings are sanitized in
//! parallel on a bounded worker pool. Writes go straight to storage and
//! invalidate the affected cache entry.

pub mod api;
pub mod error;
pub mod pool;
pub mod service;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use api::DocumentApi;
pub use error::{ApiError, ApiResult};
pub use pool::WorkerPool;
pub use service::DocumentService;
pub use telemetry::{init_tracing, TelemetryConfig};
pub use types::{DocumentRequest, Level1ItemRequest, Level2ItemRequest};

pub use docshield_core::{Document, ErrorKind, ServiceConfig};
pub use docshield_storage::{DocumentStorage, InMemoryStorage};
