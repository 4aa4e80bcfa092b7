//! Bounded fan-out/fan-in worker pool.
//!
//! A call spawns `min(cap, n)` blocking workers on the tokio blocking pool.
//! Workers share one work queue and one result channel: each repeatedly pops
//! the next unclaimed item, applies the transform, and sends the output.
//! The call returns only after every worker has been joined, so every input
//! produces exactly one output.
//!
//! Output order is completion order. Callers must not rely on it matching
//! the input order.
//!
//! Once started, a run always drains its full input. Workers are spawned on
//! the first poll and are never aborted: dropping the returned future stops
//! the wait, not the work.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use docshield_core::{Document, DEFAULT_MAX_WORKERS};
use tokio::sync::mpsc;
use tokio::task;

/// Worker pool with a static cap on concurrent workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    max_workers: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORKERS)
    }
}

impl WorkerPool {
    /// Create a pool capped at `max_workers` (at least one).
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// The worker cap.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Number of workers a run over `items` inputs spawns.
    pub fn worker_count(&self, items: usize) -> usize {
        items.min(self.max_workers)
    }

    /// Apply `transform` to every item in parallel and collect the outputs.
    ///
    /// An empty input returns immediately without spawning anything. A panic
    /// inside `transform` is resumed on the calling task after all workers
    /// have been joined.
    pub async fn run<T, R, F>(&self, items: Vec<T>, transform: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let total = items.len();
        let workers = self.worker_count(total);
        if workers == 0 {
            return Vec::new();
        }

        let queue = Arc::new(Mutex::new(VecDeque::from(items)));
        let transform = Arc::new(transform);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let transform = Arc::clone(&transform);
                let tx = tx.clone();
                task::spawn_blocking(move || {
                    let mut processed = 0usize;
                    loop {
                        let next = queue
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .pop_front();
                        let Some(item) = next else { break };
                        // receiver may be gone if the caller stopped waiting
                        let _ = tx.send(transform(item));
                        processed += 1;
                    }
                    processed
                })
            })
            .collect();
        drop(tx);

        // dropping a JoinHandle detaches its task, so workers keep draining
        // the queue even if this future is dropped mid-join
        let mut panic = None;
        for handle in handles {
            match handle.await {
                Ok(processed) => tracing::trace!(processed, "worker finished"),
                Err(err) if err.is_panic() => panic = Some(err.into_panic()),
                Err(err) => tracing::warn!(error = %err, "worker cancelled"),
            }
        }
        if let Some(payload) = panic {
            std::panic::resume_unwind(payload);
        }

        let mut results = Vec::with_capacity(total);
        while let Some(result) = rx.recv().await {
            results.push(result);
        }
        results
    }

    /// Sanitize a page of documents in parallel.
    pub async fn sanitize_all(&self, documents: Vec<Document>) -> Vec<Document> {
        self.run(documents, Document::into_sanitized).await
    }
}
