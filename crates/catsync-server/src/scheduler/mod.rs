//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the daily
//! catalog sync.

mod guard;

use std::sync::Arc;

use catsync_core::{AppConfig, OptionMapping};
use catsync_shopify::ShopifyClient;
use catsync_sync::{sync_catalog, PgCatalogStore};
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use self::guard::RunGuard;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// configured cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_sync_job(&scheduler, pool, config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the catalog sync on `config.sync_schedule` (six-field cron, UTC).
///
/// A trigger that fires while the previous run is still going is skipped.
async fn register_sync_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let store = Arc::new(PgCatalogStore::new(pool));
    let guard = RunGuard::default();
    let schedule = config.sync_schedule.clone();

    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let store = Arc::clone(&store);
        let config = Arc::clone(&config);
        let guard = guard.clone();

        Box::pin(async move {
            let Some(_permit) = guard.try_start() else {
                tracing::warn!("scheduler: previous catalog sync still running; skipping trigger");
                return;
            };

            tracing::info!("scheduler: starting catalog sync");
            run_sync_job(&store, &config).await;
            tracing::info!("scheduler: catalog sync finished");
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(schedule = %schedule, "scheduler: registered catalog sync job");
    Ok(())
}

/// One scheduled sync. Every failure is logged; the next trigger tries again.
async fn run_sync_job(store: &PgCatalogStore, config: &AppConfig) {
    let client = match ShopifyClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "scheduler: failed to build Shopify client");
            return;
        }
    };

    match sync_catalog(&client, store, &OptionMapping::default()).await {
        Ok(outcome) => {
            tracing::info!(
                products = outcome.products.len(),
                inserted = outcome.summary.inserted,
                updated = outcome.summary.updated,
                deleted = outcome.summary.deleted,
                skipped = outcome.summary.skipped,
                failed = outcome.summary.failed,
                "scheduler: catalog sync succeeded"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "scheduler: catalog sync failed");
        }
    }
}
