//! Fixed-interval cycle scheduling.

use crate::dispatch::{CycleCompletion, Dispatcher, QueryExecutor};
use loadgen_generator::{BatchGenerator, BatchSizes};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Fires one generate-and-dispatch cycle per tick.
///
/// Cycles never wait for earlier cycles' queries, so they overlap whenever
/// query latency exceeds the interval. Ticks missed because generation took
/// longer than the interval are skipped.
pub struct Scheduler<E> {
    generator: BatchGenerator,
    dispatcher: Dispatcher<E>,
    sizes: BatchSizes,
    interval: Duration,
}

impl<E: QueryExecutor> Scheduler<E> {
    pub fn new(
        generator: BatchGenerator,
        dispatcher: Dispatcher<E>,
        sizes: BatchSizes,
        interval: Duration,
    ) -> Self {
        Self {
            generator,
            dispatcher,
            sizes,
            interval,
        }
    }

    /// Generate the three batches of one cycle and dispatch them.
    pub fn run_cycle(&self, cycle: u64) -> CycleCompletion {
        let batches = self.generator.generate_cycle(self.sizes);
        debug!(cycle, total = batches.total(), "Total queries to be executed");

        let (inserts, updates, deletes) = (
            batches.inserts.len(),
            batches.updates.len(),
            batches.deletes.len(),
        );
        let completion = self.dispatcher.dispatch(cycle, batches);
        info!(cycle, inserts, updates, deletes, "Scheduled queries");

        completion
    }

    /// Run cycles every interval until `shutdown` resolves.
    ///
    /// The first cycle fires one interval after the call. Returns the number
    /// of cycles started; their queries may still be running.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut cycles = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    cycles += 1;
                    // Fire-and-forget: the watcher keeps running once the handle is dropped.
                    drop(self.run_cycle(cycles));
                }
            }
        }

        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::MockExecutor;
    use loadgen_generator::SharedRng;
    use loadgen_template::{QueryTemplates, TableTemplate, TemplateStore};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn generator(tables: &[&str], schemas: &[&str]) -> BatchGenerator {
        let templates = tables
            .iter()
            .map(|name| {
                TableTemplate::new(
                    format!("{{schema}}.{name}"),
                    QueryTemplates {
                        insert: "INSERT INTO {table} VALUES ({execution_count})".to_string(),
                        update: "UPDATE {table} SET v = {r_int}".to_string(),
                        delete: "DELETE FROM {table} WHERE v = {r_int}".to_string(),
                    },
                )
            })
            .collect();
        BatchGenerator::new(
            Arc::new(TemplateStore::new(templates)),
            schemas.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            Arc::new(SharedRng::seeded(1)),
        )
    }

    fn scheduler(
        executor: Arc<MockExecutor>,
        sizes: BatchSizes,
        interval: Duration,
    ) -> Scheduler<MockExecutor> {
        Scheduler::new(
            generator(&["users", "orders"], &["public"]),
            Dispatcher::new(executor),
            sizes,
            interval,
        )
    }

    #[tokio::test]
    async fn test_run_cycle_single_insert_batch() {
        let executor = Arc::new(MockExecutor::default());
        let scheduler = Scheduler::new(
            generator(&["users"], &["public"]),
            Dispatcher::new(Arc::clone(&executor)),
            BatchSizes {
                inserts: 2,
                updates: 0,
                deletes: 0,
            },
            Duration::from_secs(1),
        );

        let report = scheduler.run_cycle(1).report().await.unwrap();

        assert_eq!((report.inserts, report.updates, report.deletes), (2, 0, 0));
        let mut executed = executor.executed();
        executed.sort();
        assert_eq!(
            executed,
            vec![
                "INSERT INTO public.users VALUES (0)",
                "INSERT INTO public.users VALUES (1)",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_fires_once_per_interval() {
        let executor = Arc::new(MockExecutor::default());
        let scheduler = scheduler(
            Arc::clone(&executor),
            BatchSizes {
                inserts: 1,
                updates: 1,
                deletes: 1,
            },
            Duration::from_secs(1),
        );

        let cycles = scheduler
            .run_until(tokio::time::sleep(Duration::from_millis(3500)))
            .await;
        assert_eq!(cycles, 3);

        // Let the last cycle's queries finish.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(executor.executed().len(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_overlap_with_slow_queries() {
        let executor = Arc::new(MockExecutor::with_latency(Duration::from_millis(2500)));
        let scheduler = scheduler(
            Arc::clone(&executor),
            BatchSizes {
                inserts: 4,
                updates: 0,
                deletes: 0,
            },
            Duration::from_secs(1),
        );

        let cycles = scheduler
            .run_until(tokio::time::sleep(Duration::from_millis(3500)))
            .await;
        assert_eq!(cycles, 3);

        // Every cycle was dispatched while the previous ones were still running.
        assert_eq!(executor.max_in_flight.load(Ordering::SeqCst), 12);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(executor.executed().len(), 12);

        // 3 cycles x 4 inserts spread over 2 templates.
        for template in scheduler.generator.templates() {
            assert_eq!(template.execution_count(), 6);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_immediate_shutdown() {
        let executor = Arc::new(MockExecutor::default());
        let scheduler = scheduler(
            Arc::clone(&executor),
            BatchSizes::default(),
            Duration::from_secs(1),
        );

        let cycles = scheduler.run_until(std::future::ready(())).await;

        assert_eq!(cycles, 0);
        assert!(executor.executed().is_empty());
    }
}
