//! Document service orchestrator.
//!
//! Owns the cache and the worker pool, and delegates persistence to a
//! [`DocumentStorage`] collaborator. Every read path returns the sanitized
//! projection; the raw document never leaves this module through a read.

use std::time::Duration;

use docshield_core::{sanitize_and_sort, DocResult, Document, ServiceConfig};
use docshield_storage::{CacheStats, CacheStore, DocumentStorage};

use crate::pool::WorkerPool;

/// Cached, sanitizing front for a storage collaborator.
///
/// The cache lives exactly as long as the service. Two services never share
/// a cache, even over the same storage.
#[derive(Debug)]
pub struct DocumentService<S> {
    storage: S,
    cache: CacheStore,
    pool: WorkerPool,
    config: ServiceConfig,
}

impl<S: DocumentStorage> DocumentService<S> {
    /// Create a service over `storage` with the given configuration.
    pub fn new(storage: S, config: ServiceConfig) -> Self {
        tracing::info!(
            cache_ttl_ms = config.cache_ttl.as_millis() as u64,
            max_workers = config.max_workers,
            "document service created"
        );
        Self {
            storage,
            cache: CacheStore::new(config.cache_ttl),
            pool: WorkerPool::new(config.max_workers),
            config,
        }
    }

    /// Create a service with the default 60s TTL and worker cap.
    pub fn with_defaults(storage: S) -> Self {
        Self::new(storage, ServiceConfig::default())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist a new document. The cache is left untouched.
    pub async fn create(&self, document: &Document) -> DocResult<()> {
        self.storage
            .create(document)
            .await
            .inspect_err(|e| tracing::warn!(document_id = %document.id, error = %e, "create failed"))
    }

    /// Fetch one page and sanitize every document on the worker pool.
    ///
    /// The result is unordered. This path never reads or fills the cache.
    pub async fn find_all(&self, limit: usize, offset: usize) -> DocResult<Vec<Document>> {
        let page = self
            .storage
            .find_all(limit, offset)
            .await
            .inspect_err(|e| tracing::warn!(limit, offset, error = %e, "find_all failed"))?;

        tracing::debug!(
            documents = page.len(),
            workers = self.pool.worker_count(page.len()),
            "sanitizing page"
        );
        Ok(self.pool.sanitize_all(page).await)
    }

    /// Fetch one sanitized document, from cache when fresh.
    pub async fn find_by_id(&self, id: &str) -> DocResult<Document> {
        if let Some(cached) = self.cache.get(id) {
            tracing::debug!(document_id = %id, "cache hit");
            return Ok(cached);
        }
        tracing::debug!(document_id = %id, "cache miss");

        let raw = self.storage.find_by_id(id).await.inspect_err(|e| {
            if !e.is_not_found() {
                tracing::warn!(document_id = %id, error = %e, "find_by_id failed");
            }
        })?;

        let sanitized = sanitize_and_sort(&raw);
        self.cache.insert(id, sanitized.clone());
        Ok(sanitized)
    }

    /// Replace a document in storage, then drop its cache entry.
    pub async fn update(&self, document: &Document) -> DocResult<()> {
        self.storage.update(document).await.inspect_err(|e| {
            if !e.is_not_found() {
                tracing::warn!(document_id = %document.id, error = %e, "update failed");
            }
        })?;
        self.evict(&document.id);
        Ok(())
    }

    /// Remove a document from storage, then drop its cache entry.
    pub async fn delete(&self, id: &str) -> DocResult<()> {
        self.storage.delete(id).await.inspect_err(|e| {
            if !e.is_not_found() {
                tracing::warn!(document_id = %id, error = %e, "delete failed");
            }
        })?;
        self.evict(id);
        Ok(())
    }

    fn evict(&self, id: &str) {
        let removed = self.cache.invalidate(id);
        tracing::debug!(document_id = %id, removed, "cache invalidated");
    }
}
