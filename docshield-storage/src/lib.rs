//! DocShield Storage - Storage Trait, In-Memory Storage and Cache Store
//!
//! Defines the storage collaborator consumed by the document service, a
//! reference in-memory implementation of it, and the TTL cache that sits in
//! front of it on the single-document read path.

pub mod async_trait;
pub mod cache;

pub use async_trait::DocumentStorage;
pub use cache::{CacheStats, CacheStore};

use ::async_trait::async_trait;
use docshield_core::{DocResult, DocShieldError, Document, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

// ============================================================================
// IN-MEMORY STORAGE
// ============================================================================

#[derive(Debug, Clone)]
struct StoredDocument {
    /// Insertion sequence, used as the storage-native listing order.
    seq: u64,
    document: Document,
}

#[derive(Debug, Default)]
struct Inner {
    documents: HashMap<String, StoredDocument>,
    next_seq: u64,
}

/// In-memory document storage.
///
/// Lists documents in insertion order. `create` is an upsert: writing an
/// existing id replaces the document and keeps its listing position.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with `documents`, in order.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let storage = Self::new();
        if let Ok(mut inner) = storage.inner.write() {
            for document in documents {
                inner.upsert(document);
            }
        }
        storage
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .documents
            .len()
    }

    /// Whether the storage holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all stored data.
    pub fn clear(&self) -> DocResult<()> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        inner.documents.clear();
        inner.next_seq = 0;
        Ok(())
    }
}

impl Inner {
    fn upsert(&mut self, document: Document) {
        match self.documents.get_mut(&document.id) {
            Some(stored) => {
                tracing::trace!(document_id = %document.id, "replacing existing document");
                stored.document = document;
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.documents
                    .insert(document.id.clone(), StoredDocument { seq, document });
            }
        }
    }
}

#[async_trait]
impl DocumentStorage for InMemoryStorage {
    async fn create(&self, document: &Document) -> DocResult<()> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        inner.upsert(document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DocResult<Document> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        inner
            .documents
            .get(id)
            .map(|stored| stored.document.clone())
            .ok_or_else(|| DocShieldError::not_found(id))
    }

    async fn find_all(&self, limit: usize, offset: usize) -> DocResult<Vec<Document>> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut stored: Vec<&StoredDocument> = inner.documents.values().collect();
        stored.sort_by_key(|s| s.seq);
        Ok(stored
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|s| s.document.clone())
            .collect())
    }

    async fn update(&self, document: &Document) -> DocResult<()> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let stored = inner
            .documents
            .get_mut(&document.id)
            .ok_or_else(|| DocShieldError::not_found(&document.id))?;
        stored.document = document.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> DocResult<()> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        inner
            .documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DocShieldError::not_found(id))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use docshield_core::Level1Item;

    fn make_test_document(id: &str) -> Document {
        Document::new(id, format!("Title {id}"))
            .with_description("description")
            .with_item(Level1Item::new(1, "item").with_entry("C1", "value"))
    }

    #[tokio::test]
    async fn test_create_find_by_id() {
        let storage = InMemoryStorage::new();
        let doc = make_test_document("a");
        storage.create(&doc).await.unwrap();

        let found = storage.find_by_id("a").await.unwrap();
        assert_eq!(found, doc);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage.find_by_id("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_is_upsert() {
        let storage = InMemoryStorage::new();
        storage.create(&make_test_document("a")).await.unwrap();
        storage.create(&make_test_document("b")).await.unwrap();

        let replacement = Document::new("a", "Replaced");
        storage.create(&replacement).await.unwrap();

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.find_by_id("a").await.unwrap().title, "Replaced");
        let ids: Vec<_> = storage
            .find_all(10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_find_all_pages_in_insertion_order() {
        let storage = InMemoryStorage::with_documents(
            (0..25).map(|i| make_test_document(&format!("doc-{i:02}"))),
        );

        let first = storage.find_all(10, 0).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, "doc-00");
        assert_eq!(first[9].id, "doc-09");

        let last = storage.find_all(10, 20).await.unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].id, "doc-20");

        assert!(storage.find_all(10, 30).await.unwrap().is_empty());
        assert!(storage.find_all(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let storage = InMemoryStorage::with_documents([make_test_document("a")]);
        let updated = Document::new("a", "Updated");
        storage.update(&updated).await.unwrap();
        assert_eq!(storage.find_by_id("a").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage.update(&make_test_document("ghost")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = InMemoryStorage::with_documents([make_test_document("a")]);
        storage.delete("a").await.unwrap();
        assert!(storage.is_empty());

        let err = storage.delete("a").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_clear() {
        let storage = InMemoryStorage::with_documents([make_test_document("a")]);
        storage.clear().unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.inner.read().unwrap().next_seq, 0);
    }

    #[tokio::test]
    async fn test_clear_restarts_listing_order() {
        let storage = InMemoryStorage::with_documents([make_test_document("a")]);
        storage.clear().unwrap();
        storage.create(&make_test_document("c")).await.unwrap();
        storage.create(&make_test_document("b")).await.unwrap();

        let ids: Vec<String> = storage
            .find_all(10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_poisoned_lock() {
        let storage = InMemoryStorage::with_documents([
            make_test_document("a"),
            make_test_document("b"),
        ]);
        let poisoner = storage.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(storage.inner.is_poisoned());

        // len still reports the stored count
        assert_eq!(storage.len(), 2);
        assert!(!storage.is_empty());

        let err = storage.find_by_id("a").await.unwrap_err();
        assert_eq!(err, DocShieldError::from(StorageError::LockPoisoned));
        assert_eq!(
            storage.clear().unwrap_err(),
            DocShieldError::from(StorageError::LockPoisoned)
        );
    }

    #[tokio::test]
    async fn test_returned_documents_are_copies() {
        let storage = InMemoryStorage::with_documents([make_test_document("a")]);
        let mut found = storage.find_by_id("a").await.unwrap();
        found.title.push_str(" (edited)");
        assert_eq!(storage.find_by_id("a").await.unwrap().title, "Title a");
    }

    #[tokio::test]
    async fn test_arc_storage_delegates() {
        let storage = Arc::new(InMemoryStorage::new());
        let shared: Arc<InMemoryStorage> = Arc::clone(&storage);
        shared.create(&make_test_document("a")).await.unwrap();
        assert_eq!(storage.len(), 1);
    }
}
