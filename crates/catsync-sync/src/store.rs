//! The storage seam the reconciler writes through.

use async_trait::async_trait;
use catsync_core::CatalogRow;
use catsync_db::DbError;
use sqlx::PgPool;

/// Operations the reconciler needs from the local catalog table.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every SKU currently stored.
    async fn list_skus(&self) -> Result<Vec<String>, DbError>;

    /// Removes all rows whose SKU is in `skus`; returns the number removed.
    async fn delete_skus(&self, skus: &[String]) -> Result<u64, DbError>;

    async fn find_by_sku(&self, sku: &str) -> Result<Option<CatalogRow>, DbError>;

    async fn update_row(&self, row: &CatalogRow) -> Result<(), DbError>;

    /// Inserts `row` unless its SKU already exists. Returns `true` if a row
    /// was written.
    async fn insert_row(&self, row: &CatalogRow) -> Result<bool, DbError>;
}

/// [`CatalogStore`] backed by the `catalog_products` Postgres table.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_skus(&self) -> Result<Vec<String>, DbError> {
        catsync_db::list_catalog_skus(&self.pool).await
    }

    async fn delete_skus(&self, skus: &[String]) -> Result<u64, DbError> {
        catsync_db::delete_catalog_rows(&self.pool, skus).await
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<CatalogRow>, DbError> {
        let row = catsync_db::get_catalog_row(&self.pool, sku).await?;
        Ok(row.map(CatalogRow::from))
    }

    async fn update_row(&self, row: &CatalogRow) -> Result<(), DbError> {
        catsync_db::update_catalog_row(&self.pool, row).await
    }

    async fn insert_row(&self, row: &CatalogRow) -> Result<bool, DbError> {
        catsync_db::insert_catalog_row(&self.pool, row).await
    }
}
