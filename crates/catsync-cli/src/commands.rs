//! Command handlers for the CLI.
//!
//! These are called from `main` after configuration is loaded. Unlike the
//! server, the CLI treats an unreachable database as fatal.

use std::collections::HashSet;

use catsync_core::{AppConfig, CatalogRow, OptionMapping};
use catsync_shopify::{normalize_product, ShopifyClient};
use catsync_sync::{sync_catalog, PgCatalogStore};
use sqlx::PgPool;

/// Opens the database pool eagerly.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = catsync_db::connect_pool(
        catsync_db::connect_options(config),
        catsync_db::PoolConfig::from_app_config(config),
    )
    .await
    .map_err(|e| anyhow::anyhow!("failed to connect to {}/{}: {e}", config.db_host, config.db_name))?;
    Ok(pool)
}

/// Runs one full sync against the configured shop and prints the summary.
///
/// # Errors
///
/// Returns an error if the Shopify client cannot be built, the remote fetch
/// fails, or the stored SKUs cannot be listed. Per-record write failures are
/// reported in the summary instead.
pub(crate) async fn run_sync(pool: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let client = ShopifyClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Shopify client: {e}"))?;
    let store = PgCatalogStore::new(pool.clone());

    tracing::info!(endpoint = %client.endpoint(), "cli: starting catalog sync");
    let outcome = sync_catalog(&client, &store, &OptionMapping::default()).await?;

    println!(
        "synced {} remote products: {}",
        outcome.products.len(),
        outcome.summary
    );
    if outcome.summary.failed > 0 {
        eprintln!(
            "warning: {} records failed to write; see log for details",
            outcome.summary.failed
        );
    }
    Ok(())
}

/// Fetches and normalizes the remote catalog, printing what a sync would
/// store, without opening the database.
///
/// # Errors
///
/// Returns an error if the Shopify client cannot be built or the fetch fails.
pub(crate) async fn run_sync_dry_run(config: &AppConfig) -> anyhow::Result<()> {
    let client = ShopifyClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Shopify client: {e}"))?;
    let products = client.fetch_all_products().await?;
    let mapping = OptionMapping::default();

    let (rows, rejected) = normalize_for_preview(&products, &mapping);
    for (product_id, reason) in &rejected {
        eprintln!("skip {product_id}: {reason}");
    }
    println!(
        "dry-run: fetched {} products, {} would be stored, {} skipped",
        products.len(),
        rows.len(),
        rejected.len()
    );
    Ok(())
}

/// Splits fetched products into normalized rows and `(product id, reason)`
/// pairs for the ones that cannot be stored.
///
/// A product whose SKU was already seen is rejected, matching the
/// first-wins rule a real sync applies.
pub(crate) fn normalize_for_preview(
    products: &[catsync_shopify::ShopifyProduct],
    mapping: &OptionMapping,
) -> (Vec<CatalogRow>, Vec<(String, String)>) {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    let mut rejected = Vec::new();
    for product in products {
        match normalize_product(product, mapping) {
            Ok(row) if !seen.insert(row.sku.clone()) => {
                rejected.push((product.id.clone(), format!("duplicate sku {}", row.sku)));
            }
            Ok(row) => rows.push(row),
            Err(e) => rejected.push((product.id.clone(), e.to_string())),
        }
    }
    (rows, rejected)
}

/// Applies pending migrations and prints how many ran.
///
/// # Errors
///
/// Returns an error if any migration fails.
pub(crate) async fn run_migrate(pool: &PgPool) -> anyhow::Result<()> {
    tracing::info!("cli: applying database migrations");
    let applied = catsync_db::run_migrations(pool).await?;
    println!("applied {applied} migrations");
    Ok(())
}

/// Prints every catalog row as a pretty JSON array.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_products(pool: &PgPool) -> anyhow::Result<()> {
    let rows: Vec<CatalogRow> = catsync_db::list_catalog_rows(pool)
        .await?
        .into_iter()
        .map(CatalogRow::from)
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
