//! One full catalog sync: fetch the remote catalog, then reconcile the local
//! table against it.

pub mod reconcile;
pub mod store;

pub use reconcile::{reconcile, ReconcileOutcome, ReconcileSummary};
pub use store::{CatalogStore, PgCatalogStore};

use catsync_core::OptionMapping;
use catsync_db::DbError;
use catsync_shopify::{ShopifyClient, ShopifyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to fetch remote catalog: {0}")]
    Fetch(#[from] ShopifyError),
    #[error("catalog store error: {0}")]
    Store(#[from] DbError),
}

/// Fetches every product from `client` and reconciles `store` against them.
///
/// # Errors
///
/// Returns [`SyncError::Fetch`] if any page of the remote catalog fails; the
/// store is not touched in that case. Returns [`SyncError::Store`] if the
/// stored SKUs cannot be listed.
pub async fn sync_catalog<S>(
    client: &ShopifyClient,
    store: &S,
    mapping: &OptionMapping,
) -> Result<ReconcileOutcome, SyncError>
where
    S: CatalogStore + ?Sized,
{
    tracing::info!(endpoint = %client.endpoint(), "sync: fetching remote catalog");
    let products = client.fetch_all_products().await?;
    tracing::info!(products = products.len(), "sync: fetched remote catalog");

    let outcome = reconcile(store, products, mapping).await?;
    tracing::info!(summary = %outcome.summary, "sync: reconcile complete");
    Ok(outcome)
}
