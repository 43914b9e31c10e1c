//! Workload runner.

use anyhow::Context;
use loadgen_generator::{BatchGenerator, RandomValueProvider, SharedRng};
use loadgen_postgresql::PostgreSQLPool;
use loadgen_template::TemplateStore;
use std::sync::Arc;

use crate::config::RunConfig;
use crate::dispatch::Dispatcher;
use crate::logging::mask_connection_password;
use crate::scheduler::Scheduler;

/// Build the batch generator for a run: load templates and set up the random source.
pub fn build_generator(config: &RunConfig) -> anyhow::Result<BatchGenerator> {
    let templates = TemplateStore::from_file(&config.template_path)
        .with_context(|| format!("Failed to load templates from {:?}", config.template_path))?;

    let random: Arc<dyn RandomValueProvider> = match config.seed {
        Some(seed) => Arc::new(SharedRng::seeded(seed)),
        None => Arc::new(SharedRng::from_entropy()),
    };

    Ok(BatchGenerator::new(
        Arc::new(templates),
        config.schemas.clone(),
        random,
    ))
}

/// Run the workload until Ctrl-C.
pub async fn run_workload(config: RunConfig) -> anyhow::Result<()> {
    let generator = build_generator(&config)?;

    if config.dry_run {
        return dry_run(&config, &generator);
    }

    tracing::info!(
        "Connecting to {}",
        mask_connection_password(&config.connection_string)
    );
    let pool = PostgreSQLPool::connect(&config.connection_string, config.pool)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let pool = Arc::new(pool);

    tracing::info!(
        "Starting workload: {} inserts, {} updates, {} deletes every {:?} across schemas {:?}",
        config.sizes.inserts,
        config.sizes.updates,
        config.sizes.deletes,
        config.interval,
        config.schemas
    );

    let scheduler = Scheduler::new(
        generator,
        Dispatcher::new(Arc::clone(&pool)),
        config.sizes,
        config.interval,
    );
    let cycles = scheduler.run_until(shutdown_signal()).await;

    let status = pool.status();
    tracing::info!(
        "Shutting down after {} cycles ({} connections open, {} idle)",
        cycles,
        status.size,
        status.idle
    );
    pool.close().await;

    Ok(())
}

/// Generate one cycle and log its queries without touching the database.
fn dry_run(config: &RunConfig, generator: &BatchGenerator) -> anyhow::Result<()> {
    tracing::info!(
        "[DRY-RUN] Connection: {}",
        mask_connection_password(&config.connection_string)
    );
    tracing::info!(
        "[DRY-RUN] {} templates, schemas {:?}",
        generator.templates().len(),
        config.schemas
    );

    let batches = generator.generate_cycle(config.sizes);
    for batch in batches.iter() {
        for query in &batch.queries {
            tracing::info!("[DRY-RUN] {}: {}", batch.kind, query);
        }
    }
    tracing::info!(
        "[DRY-RUN] Would dispatch {} inserts, {} updates, {} deletes every {:?}",
        batches.inserts.len(),
        batches.updates.len(),
        batches.deletes.len(),
        config.interval
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl-C, no further cycles will be scheduled");
}
