//! Id-keyed TTL store guarded by a reader/writer lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use docshield_core::{deep_copy, Document};
use tokio::time::Instant;

use super::traits::CacheStats;

#[derive(Debug)]
struct CacheEntry {
    document: Document,
    /// `None` when `now + ttl` overflows; such an entry never expires.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Cache of sanitized documents keyed by document id.
///
/// Reads take the shared lock, writes take the exclusive lock, and neither
/// is held for longer than a single map operation. The store never fails: a
/// poisoned lock still yields its map, and a miss is an ordinary `None`.
///
/// The store performs no transformation. Callers must sanitize documents
/// before handing them in.
#[derive(Debug)]
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStore {
    /// Create an empty store whose [`insert`](Self::insert) uses `ttl`.
    ///
    /// A zero TTL disables caching in effect: entries are already expired
    /// when written.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The TTL this store was constructed with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `id`, returning an independent copy if the entry is fresh.
    ///
    /// Expired entries are reported as a miss and left in place.
    pub fn get(&self, id: &str) -> Option<Document> {
        let now = Instant::now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let found = match entries.get(id) {
            Some(entry) if entry.is_fresh(now) => Some(deep_copy(&entry.document)),
            Some(_) => {
                tracing::trace!(document_id = %id, "cache entry expired");
                None
            }
            None => None,
        };
        drop(entries);

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Store `document` under `id`, expiring `ttl` from now.
    ///
    /// Unconditionally overwrites any previous entry for `id`.
    pub fn put(&self, id: impl Into<String>, document: Document, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        let entry = CacheEntry {
            document,
            expires_at,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), entry);
    }

    /// Store `document` under `id` with the store's own TTL.
    pub fn insert(&self, id: impl Into<String>, document: Document) {
        self.put(id, document, self.ttl);
    }

    /// Remove the entry for `id`. Returns whether an entry was present.
    pub fn invalidate(&self, id: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    /// Number of entries in the map, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of hit/miss counters and the current entry count.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.len() as u64,
        }
    }
}
