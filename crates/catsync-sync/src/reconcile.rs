//! Diffing normalized remote products against the local catalog.

use std::collections::HashSet;

use catsync_core::{CatalogRow, OptionMapping};
use catsync_shopify::{normalize_product, ShopifyProduct};

use crate::store::CatalogStore;
use crate::SyncError;

/// Per-run counts of what the reconciler did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: u64,
    /// Products that could not be keyed, or whose SKU was already seen.
    pub skipped: usize,
    /// Records whose lookup or write failed.
    pub failed: usize,
}

impl ReconcileSummary {
    /// Number of insert, update and delete writes that took effect.
    #[must_use]
    pub fn writes(&self) -> u64 {
        // usize -> u64 is lossless on every supported target.
        self.inserted as u64 + self.updated as u64 + self.deleted
    }
}

impl std::fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inserted={} updated={} unchanged={} deleted={} skipped={} failed={}",
            self.inserted, self.updated, self.unchanged, self.deleted, self.skipped, self.failed
        )
    }
}

/// The product list handed to [`reconcile`], passed through unchanged, plus
/// the run summary.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub products: Vec<ShopifyProduct>,
    pub summary: ReconcileSummary,
}

/// Brings the store in line with `products`.
///
/// Rows whose SKU is missing from `products` are removed with one delete.
/// Each remaining record is then looked up and either inserted, overwritten
/// if any field differs, or left alone. Writes run one record at a time and
/// are committed independently.
///
/// A failed lookup or write is logged with its SKU and counted in
/// [`ReconcileSummary::failed`]; the run continues. A failed delete is logged
/// and the run continues.
///
/// # Errors
///
/// Returns [`SyncError::Store`] if the stored SKUs cannot be listed. No write
/// has been attempted at that point.
pub async fn reconcile<S>(
    store: &S,
    products: Vec<ShopifyProduct>,
    mapping: &OptionMapping,
) -> Result<ReconcileOutcome, SyncError>
where
    S: CatalogStore + ?Sized,
{
    let mut summary = ReconcileSummary::default();
    let rows = normalize_all(&products, mapping, &mut summary);

    let remote_skus: HashSet<&str> = rows.iter().map(|row| row.sku.as_str()).collect();
    let local_skus = store.list_skus().await?;

    let stale: Vec<String> = local_skus
        .into_iter()
        .filter(|sku| !remote_skus.contains(sku.as_str()))
        .collect();

    if !stale.is_empty() {
        match store.delete_skus(&stale).await {
            Ok(deleted) => {
                tracing::info!(deleted, "sync: removed products no longer in remote catalog");
                summary.deleted = deleted;
            }
            Err(e) => {
                tracing::error!(count = stale.len(), error = %e, "sync: failed to delete stale products");
                summary.failed += stale.len();
            }
        }
    }

    for row in &rows {
        match apply_row(store, row).await {
            Ok(RowAction::Inserted) => summary.inserted += 1,
            Ok(RowAction::Updated) => summary.updated += 1,
            Ok(RowAction::Unchanged) => summary.unchanged += 1,
            Err(e) => {
                tracing::error!(sku = %row.sku, error = %e, "sync: failed to write product");
                summary.failed += 1;
            }
        }
    }

    Ok(ReconcileOutcome { products, summary })
}

/// Normalizes every product, dropping ones that cannot be keyed and
/// duplicates of an SKU already seen.
fn normalize_all(
    products: &[ShopifyProduct],
    mapping: &OptionMapping,
    summary: &mut ReconcileSummary,
) -> Vec<CatalogRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(products.len());

    for product in products {
        let row = match normalize_product(product, mapping) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(product_id = %product.id, error = %e, "sync: skipping product");
                summary.skipped += 1;
                continue;
            }
        };

        if !seen.insert(row.sku.clone()) {
            tracing::warn!(
                sku = %row.sku,
                product_id = %product.id,
                "sync: duplicate sku in remote catalog, keeping first occurrence"
            );
            summary.skipped += 1;
            continue;
        }

        rows.push(row);
    }

    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    Inserted,
    Updated,
    Unchanged,
}

async fn apply_row<S>(store: &S, row: &CatalogRow) -> Result<RowAction, catsync_db::DbError>
where
    S: CatalogStore + ?Sized,
{
    match store.find_by_sku(&row.sku).await? {
        Some(existing) => {
            let changed = existing.changed_fields(row);
            if changed.is_empty() {
                return Ok(RowAction::Unchanged);
            }
            store.update_row(row).await?;
            tracing::debug!(sku = %row.sku, fields = ?changed, "sync: updated product");
            Ok(RowAction::Updated)
        }
        None => {
            if store.insert_row(row).await? {
                tracing::debug!(sku = %row.sku, "sync: inserted product");
                Ok(RowAction::Inserted)
            } else {
                // Row appeared between the lookup and the insert.
                tracing::warn!(sku = %row.sku, "sync: insert skipped, sku already present");
                Ok(RowAction::Unchanged)
            }
        }
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
