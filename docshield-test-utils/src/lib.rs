//! DocShield Test Utilities
//!
//! Centralized test infrastructure for the DocShield workspace:
//! - Proptest generators for documents
//! - A call-counting storage wrapper with failure injection
//! - Test fixtures for common scenarios
//! - Custom assertions for sanitization and error kinds

// Re-export in-memory storage from its source crate
pub use docshield_storage::{DocumentStorage, InMemoryStorage};

// Re-export core types for convenience
pub use docshield_core::{
    sanitize_and_sort, DocResult, DocShieldError, Document, ErrorKind, Level1Item, Level2Item,
    StorageError,
};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

// ============================================================================
// COUNTING STORAGE
// ============================================================================

/// Per-operation call counts recorded by [`CountingStorage`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create: usize,
    pub find_by_id: usize,
    pub find_all: usize,
    pub update: usize,
    pub delete: usize,
}

/// Storage wrapper that counts calls and can be told to fail.
///
/// Wrap it in an `Arc` and keep a handle to inspect counts while the
/// service owns another.
#[derive(Debug, Default)]
pub struct CountingStorage<S = InMemoryStorage> {
    inner: S,
    create: AtomicUsize,
    find_by_id: AtomicUsize,
    find_all: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    failure: Mutex<Option<StorageError>>,
}

impl<S: DocumentStorage> CountingStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            create: AtomicUsize::new(0),
            find_by_id: AtomicUsize::new(0),
            find_all: AtomicUsize::new(0),
            update: AtomicUsize::new(0),
            delete: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Access the wrapped storage.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Snapshot of call counts so far.
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            create: self.create.load(Ordering::SeqCst),
            find_by_id: self.find_by_id.load(Ordering::SeqCst),
            find_all: self.find_all.load(Ordering::SeqCst),
            update: self.update.load(Ordering::SeqCst),
            delete: self.delete.load(Ordering::SeqCst),
        }
    }

    /// Make every subsequent call fail with `error` (calls are still counted).
    pub fn fail_with(&self, error: StorageError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Stop injecting failures.
    pub fn recover(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn check(&self, counter: &AtomicUsize) -> DocResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<S: DocumentStorage> DocumentStorage for CountingStorage<S> {
    async fn create(&self, document: &Document) -> DocResult<()> {
        self.check(&self.create)?;
        self.inner.create(document).await
    }

    async fn find_by_id(&self, id: &str) -> DocResult<Document> {
        self.check(&self.find_by_id)?;
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self, limit: usize, offset: usize) -> DocResult<Vec<Document>> {
        self.check(&self.find_all)?;
        self.inner.find_all(limit, offset).await
    }

    async fn update(&self, document: &Document) -> DocResult<()> {
        self.check(&self.update)?;
        self.inner.update(document).await
    }

    async fn delete(&self, id: &str) -> DocResult<()> {
        self.check(&self.delete)?;
        self.inner.delete(id).await
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating DocShield documents.

    use super::*;
    use proptest::prelude::*;

    /// Generate a second-level item.
    pub fn arb_level2_item() -> impl Strategy<Value = Level2Item> {
        ("[A-Z]{1,3}[0-9]{0,3}", "[a-z ]{0,16}")
            .prop_map(|(code, value)| Level2Item { code, value })
    }

    /// Generate a first-level item. Sort keys come from a narrow range so
    /// generated documents regularly contain ties.
    pub fn arb_level1_item() -> impl Strategy<Value = Level1Item> {
        (
            -3i64..=3,
            "[a-z ]{0,16}",
            prop::collection::vec(arb_level2_item(), 0..5),
        )
            .prop_map(|(sort, name, level2)| Level1Item { sort, name, level2 })
    }

    /// Generate a document id.
    pub fn arb_document_id() -> impl Strategy<Value = String> {
        "[a-z0-9]{8}"
    }

    /// Generate a complete document.
    pub fn arb_document() -> impl Strategy<Value = Document> {
        (
            arb_document_id(),
            "[A-Za-z ]{0,24}",
            "[A-Za-z ]{0,48}",
            prop::collection::vec(arb_level1_item(), 0..10),
        )
            .prop_map(|(id, title, description, level1)| Document {
                id,
                title,
                description,
                level1,
            })
    }

    /// Generate a page of documents with distinct ids.
    pub fn arb_document_page(max: usize) -> impl Strategy<Value = Vec<Document>> {
        prop::collection::vec(arb_document(), 0..=max).prop_map(|docs| {
            docs.into_iter()
                .enumerate()
                .map(|(i, mut doc)| {
                    doc.id = format!("{}-{i}", doc.id);
                    doc
                })
                .collect()
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// A document with every private field populated and items out of order.
    ///
    /// Level1 sorts are `[3, 1, 3, 2]`; the two `sort = 3` items carry codes
    /// `"A"` and `"C"` respectively.
    pub fn sample_document(id: &str) -> Document {
        Document::new(id, format!("Document {id}"))
            .with_description("confidential description")
            .with_item(Level1Item::new(3, "alpha").with_entry("A", "a-secret"))
            .with_item(Level1Item::new(1, "bravo").with_entry("B", "b-secret"))
            .with_item(
                Level1Item::new(3, "charlie")
                    .with_entry("C", "c-secret")
                    .with_entry("C2", "c2-secret"),
            )
            .with_item(Level1Item::new(2, "delta").with_entry("D", "d-secret"))
    }

    /// `count` sample documents with ids `doc-00`, `doc-01`, ...
    pub fn documents(count: usize) -> Vec<Document> {
        (0..count)
            .map(|i| sample_document(&format!("doc-{i:02}")))
            .collect()
    }

    /// An in-memory storage seeded with `documents(count)`.
    pub fn seeded_storage(count: usize) -> InMemoryStorage {
        InMemoryStorage::with_documents(documents(count))
    }

    /// A counting storage seeded with `documents(count)`.
    pub fn counting_storage(count: usize) -> CountingStorage {
        CountingStorage::new(seeded_storage(count))
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for DocShield-specific validation.

    use super::*;

    /// Assert that `doc` is the sanitized projection of `raw`.
    #[track_caller]
    pub fn assert_sanitized_from(doc: &Document, raw: &Document) {
        assert_eq!(doc, &sanitize_and_sort(raw), "Document is not the sanitized form of its source");
    }

    /// Assert that no private field of `doc` carries data.
    #[track_caller]
    pub fn assert_sanitized(doc: &Document) {
        assert!(doc.description.is_empty(), "description not cleared: {:?}", doc.description);
        for item in &doc.level1 {
            assert!(item.name.is_empty(), "level1 name not cleared: {:?}", item.name);
            for entry in &item.level2 {
                assert!(entry.value.is_empty(), "level2 value not cleared: {:?}", entry.value);
            }
        }
        assert!(
            doc.level1.windows(2).all(|w| w[0].sort >= w[1].sort),
            "level1 not sorted descending: {:?}",
            doc.level1.iter().map(|i| i.sort).collect::<Vec<_>>()
        );
    }

    /// Assert that a DocResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &DocResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a DocResult is a NotFound storage error.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &DocResult<T>) {
        match result {
            Err(err) if err.is_not_found() => {}
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    /// Assert that a DocResult failed with the given boundary kind.
    #[track_caller]
    pub fn assert_error_kind<T: std::fmt::Debug>(result: &DocResult<T>, kind: ErrorKind) {
        match result {
            Err(err) => assert_eq!(ErrorKind::from(err), kind, "Wrong error kind for {:?}", err),
            Ok(v) => panic!("Expected {:?} error, got Ok({:?})", kind, v),
        }
    }

    /// Assert that two document collections are equal as sets of ids.
    #[track_caller]
    pub fn assert_same_ids(a: &[Document], b: &[Document]) {
        let mut left: Vec<&str> = a.iter().map(|d| d.id.as_str()).collect();
        let mut right: Vec<&str> = b.iter().map(|d| d.id.as_str()).collect();
        left.sort_unstable();
        right.sort_unstable();
        assert_eq!(left, right, "Document id sets differ");
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sample_document_fixture() {
        let doc = fixtures::sample_document("x");
        let sorts: Vec<_> = doc.level1.iter().map(|i| i.sort).collect();
        assert_eq!(sorts, vec![3, 1, 3, 2]);
        assert!(!doc.description.is_empty());
    }

    #[test]
    fn test_documents_fixture_has_unique_ids() {
        let docs = fixtures::documents(25);
        assert_eq!(docs.len(), 25);
        assertions::assert_same_ids(&docs, &docs);
        assert_eq!(docs[0].id, "doc-00");
        assert_eq!(docs[24].id, "doc-24");
    }

    #[tokio::test]
    async fn test_counting_storage_counts_calls() {
        let storage = fixtures::counting_storage(3);
        storage.find_by_id("doc-00").await.unwrap();
        storage.find_all(10, 0).await.unwrap();
        storage.delete("doc-01").await.unwrap();

        let calls = storage.calls();
        assert_eq!(calls.find_by_id, 1);
        assert_eq!(calls.find_all, 1);
        assert_eq!(calls.delete, 1);
        assert_eq!(calls.create, 0);
        assert_eq!(storage.inner().len(), 2);
    }

    #[tokio::test]
    async fn test_counting_storage_failure_injection() {
        let storage = fixtures::counting_storage(1);
        storage.fail_with(StorageError::Unavailable {
            reason: "down".to_string(),
        });
        let result = storage.find_by_id("doc-00").await;
        assertions::assert_error_kind(&result, ErrorKind::Internal);

        storage.recover();
        assertions::assert_ok(&storage.find_by_id("doc-00").await);
        assert_eq!(storage.calls().find_by_id, 2);
    }

    #[test]
    fn test_assertion_not_found() {
        let result: DocResult<()> = Err(DocShieldError::not_found("x"));
        assertions::assert_not_found(&result);
        assertions::assert_error_kind(&result, ErrorKind::NotFound);
    }

    #[test]
    fn test_assert_sanitized_accepts_sanitized_fixture() {
        let raw = fixtures::sample_document("x");
        let clean = sanitize_and_sort(&raw);
        assertions::assert_sanitized(&clean);
        assertions::assert_sanitized_from(&clean, &raw);
    }

    #[test]
    #[should_panic(expected = "description not cleared")]
    fn test_assert_sanitized_rejects_raw() {
        assertions::assert_sanitized(&fixtures::sample_document("x"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_generated_page_has_distinct_ids(page in generators::arb_document_page(20)) {
            let mut ids: Vec<_> = page.iter().map(|d| d.id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), page.len());
        }

        #[test]
        fn prop_generated_documents_sanitize_cleanly(doc in generators::arb_document()) {
            assertions::assert_sanitized(&sanitize_and_sort(&doc));
        }
    }
}
