//! Bounded fan-out over per-record operations.
//!
//! One tokio task per record, gated by a semaphore so at most `workers`
//! operations are in flight at any instant. Results are collected into an
//! id-keyed map once every task has finished; nothing is exposed mid-flight.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::DispatchConfig;
use crate::types::ImageRecord;

/// Runs one operation per record under a fixed concurrency bound.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    capacity: usize,
}

impl Dispatcher {
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            capacity: config.workers,
        }
    }

    /// Dispatch `op` for every record, at most `capacity` in flight at once.
    ///
    /// Returns only after every submitted operation has completed, as a map
    /// keyed by record id with one entry per distinct id. Completion order
    /// does not affect the mapping; with duplicate ids the result observed
    /// last by the collector wins, so callers needing determinism must keep
    /// ids unique.
    ///
    /// A failure inside one operation surfaces only as that record's own
    /// result value. A panicked task is caught at the join boundary and
    /// replaced with `on_fault(record)`; sibling operations and the overall
    /// dispatch are unaffected.
    pub async fn dispatch<T, F, Fut>(
        &self,
        records: Vec<ImageRecord>,
        op: F,
        on_fault: impl Fn(&ImageRecord) -> T,
    ) -> HashMap<i64, T>
    where
        T: Send + 'static,
        F: Fn(ImageRecord) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.capacity));
        let op = Arc::new(op);
        let mut handles = Vec::with_capacity(records.len());

        for record in records {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::warn!("Dispatch semaphore closed unexpectedly — stopping fan-out");
                    break;
                }
            };
            let op = op.clone();
            let submitted = record.clone();

            let handle = tokio::spawn(async move {
                let result = op(record).await;
                drop(permit); // Release concurrency slot before collection
                result
            });

            handles.push((submitted, handle));
        }

        let mut results = HashMap::with_capacity(handles.len());
        for (record, handle) in handles {
            match handle.await {
                Ok(result) => {
                    results.insert(record.id, result);
                }
                Err(e) => {
                    tracing::error!("Dispatched task for id {} panicked: {e}", record.id);
                    results.insert(record.id, on_fault(&record));
                }
            }
        }

        results
    }
}
