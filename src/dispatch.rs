//! Concurrent dispatch of generated batches.
//!
//! Every query of a cycle runs as its own task in a [`JoinSet`]. Dispatch
//! returns as soon as all tasks are spawned; a detached watcher drains the set,
//! counting the cycle's outstanding queries down to zero, and then logs the
//! cycle's completion report. The number of queries actually talking to the
//! database at once is bounded by the executor (the pool's connection limit),
//! not here.

use async_trait::async_trait;
use loadgen_generator::CycleBatches;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::Instant;
use tracing::{error, info};

/// Something that can execute a single SQL statement.
#[async_trait]
pub trait QueryExecutor: Send + Sync + 'static {
    async fn execute(&self, query: &str) -> anyhow::Result<()>;
}

/// Outcome of one dispatched cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    pub inserts: usize,
    pub updates: usize,
    pub deletes: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Wall-clock time from dispatch start until the last query finished.
    pub elapsed: Duration,
}

impl CycleReport {
    /// Total queries dispatched in the cycle.
    pub fn total(&self) -> usize {
        self.inserts + self.updates + self.deletes
    }

    /// Calculate queries per second.
    pub fn queries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.total() as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Handle on a dispatched cycle's completion watcher.
///
/// Dropping the handle detaches the watcher; the report is still logged.
#[derive(Debug)]
pub struct CycleCompletion {
    handle: JoinHandle<CycleReport>,
}

impl CycleCompletion {
    /// Wait until every query of the cycle has finished.
    pub async fn report(self) -> Result<CycleReport, JoinError> {
        self.handle.await
    }

    /// Whether every query of the cycle has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Fans cycle batches out to an executor.
pub struct Dispatcher<E> {
    executor: Arc<E>,
}

impl<E> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: QueryExecutor> Dispatcher<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Launch one task per query and return without waiting for them.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, cycle: u64, batches: CycleBatches) -> CycleCompletion {
        let started = Instant::now();
        let inserts = batches.inserts.len();
        let updates = batches.updates.len();
        let deletes = batches.deletes.len();
        let total = batches.total();

        let mut units = JoinSet::new();
        for batch in batches.into_batches() {
            for query in batch.queries {
                let executor = Arc::clone(&self.executor);
                units.spawn(async move {
                    match executor.execute(&query).await {
                        Ok(()) => true,
                        Err(e) => {
                            error!(query = %query, error = %format!("{e:#}"), "Query execution failed");
                            false
                        }
                    }
                });
            }
        }

        let handle = tokio::spawn(async move {
            let mut remaining = total;
            let mut failed = 0;

            while remaining > 0 {
                match units.join_next().await {
                    Some(Ok(true)) => {}
                    Some(Ok(false)) => failed += 1,
                    Some(Err(e)) => {
                        error!("Query task did not complete: {}", e);
                        failed += 1;
                    }
                    None => break,
                }
                remaining -= 1;
            }

            let report = CycleReport {
                cycle,
                inserts,
                updates,
                deletes,
                succeeded: total - failed,
                failed,
                elapsed: started.elapsed(),
            };

            info!(
                cycle,
                inserts,
                updates,
                deletes,
                failed,
                elapsed_ms = report.elapsed.as_millis() as u64,
                queries_per_second = %format!("{:.2}", report.queries_per_second()),
                "Batch completed"
            );

            report
        });

        CycleCompletion { handle }
    }
}
