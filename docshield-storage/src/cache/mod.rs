//! TTL cache for sanitized documents.
//!
//! The cache maps a document id to the sanitized projection of that document
//! plus an absolute expiry instant. It is deliberately small:
//!
//! - keyed by document id only
//! - no eviction policy and no size bound
//! - expiry is checked lazily on read; stale entries stay in the map until
//!   the next miss for the same id overwrites them
//!
//! Every value going in or out is an independent copy, so callers can never
//! observe or corrupt the map through a returned document.
//!
//! # Example
//!
//! ```ignore
//! let cache = CacheStore::new(Duration::from_secs(60));
//! cache.insert("doc-1", sanitize_and_sort(&raw));
//!
//! if let Some(doc) = cache.get("doc-1") {
//!     // independent copy, safe to mutate
//! }
//! cache.invalidate("doc-1");
//! ```

pub mod store;
pub mod traits;

pub use store::CacheStore;
pub use traits::CacheStats;
