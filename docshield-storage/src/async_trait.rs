//! Async storage trait for the document persistence collaborator.
//!
//! The service core never sees the persistence engine directly; it talks to
//! whatever implements [`DocumentStorage`]. Implementations may honor
//! caller deadlines by being wrapped in `tokio::time::timeout`.

use ::async_trait::async_trait;
use docshield_core::{DocResult, Document};
use std::sync::Arc;

/// Async storage trait for document CRUD.
///
/// Errors follow the core taxonomy: a missing id is reported as
/// `StorageError::NotFound`, every other failure as some other
/// `StorageError` variant.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Persist a new document. The id is assigned by the caller.
    async fn create(&self, document: &Document) -> DocResult<()>;

    /// Get a document by id, or `NotFound`.
    async fn find_by_id(&self, id: &str) -> DocResult<Document>;

    /// List one page of documents in storage-native order.
    async fn find_all(&self, limit: usize, offset: usize) -> DocResult<Vec<Document>>;

    /// Replace an existing document, or `NotFound`.
    async fn update(&self, document: &Document) -> DocResult<()>;

    /// Delete a document by id, or `NotFound`.
    async fn delete(&self, id: &str) -> DocResult<()>;
}

#[async_trait]
impl<S> DocumentStorage for Arc<S>
where
    S: DocumentStorage + ?Sized,
{
    async fn create(&self, document: &Document) -> DocResult<()> {
        (**self).create(document).await
    }

    async fn find_by_id(&self, id: &str) -> DocResult<Document> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self, limit: usize, offset: usize) -> DocResult<Vec<Document>> {
        (**self).find_all(limit, offset).await
    }

    async fn update(&self, document: &Document) -> DocResult<()> {
        (**self).update(document).await
    }

    async fn delete(&self, id: &str) -> DocResult<()> {
        (**self).delete(id).await
    }
}
