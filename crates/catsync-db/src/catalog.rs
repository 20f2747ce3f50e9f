//! Database operations for the `catalog_products` table.

use catsync_core::CatalogRow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `catalog_products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogProductRow {
    pub sku: String,
    pub title: String,
    pub description: String,
    /// JSON array of image URLs, serialized as text.
    pub image_urls: String,
    pub image_url: Option<String>,
    pub price: String,
    pub quantity: Option<i32>,
    pub sizes: String,
    pub colors: String,
    pub materials: String,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogProductRow> for CatalogRow {
    fn from(row: CatalogProductRow) -> Self {
        CatalogRow {
            sku: row.sku,
            title: row.title,
            description: row.description,
            image_urls: row.image_urls,
            image_url: row.image_url,
            price: row.price,
            quantity: row.quantity,
            sizes: row.sizes,
            colors: row.colors,
            materials: row.materials,
            category: row.category,
            status: row.status,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT sku, title, description, image_urls, image_url, price, \
                                     quantity, sizes, colors, materials, category, status, \
                                     created_at, updated_at \
                              FROM catalog_products";

/// Returns every row in the catalog, ordered by SKU.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_catalog_rows(pool: &PgPool) -> Result<Vec<CatalogProductRow>, DbError> {
    let rows = sqlx::query_as::<_, CatalogProductRow>(&format!("{SELECT_COLUMNS} ORDER BY sku"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Returns the SKU of every row in the catalog.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_catalog_skus(pool: &PgPool) -> Result<Vec<String>, DbError> {
    let skus = sqlx::query_scalar::<_, String>("SELECT sku FROM catalog_products")
        .fetch_all(pool)
        .await?;
    Ok(skus)
}

/// Looks up one row by SKU.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_catalog_row(
    pool: &PgPool,
    sku: &str,
) -> Result<Option<CatalogProductRow>, DbError> {
    let row = sqlx::query_as::<_, CatalogProductRow>(&format!("{SELECT_COLUMNS} WHERE sku = $1"))
        .bind(sku)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Inserts a row unless one with the same SKU already exists.
///
/// Returns `true` if a row was inserted, `false` if the SKU was already
/// present (the existing row is left untouched).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_catalog_row(pool: &PgPool, row: &CatalogRow) -> Result<bool, DbError> {
    let rows_affected = sqlx::query(
        "INSERT INTO catalog_products \
             (sku, title, description, image_urls, image_url, price, \
              quantity, sizes, colors, materials, category, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (sku) DO NOTHING",
    )
    .bind(&row.sku)
    .bind(&row.title)
    .bind(&row.description)
    .bind(&row.image_urls)
    .bind(&row.image_url)
    .bind(&row.price)
    .bind(row.quantity)
    .bind(&row.sizes)
    .bind(&row.colors)
    .bind(&row.materials)
    .bind(&row.category)
    .bind(&row.status)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(rows_affected > 0)
}

/// Overwrites every non-key column of the row with `row.sku`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that SKU, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_catalog_row(pool: &PgPool, row: &CatalogRow) -> Result<(), DbError> {
    let rows_affected = sqlx::query(
        "UPDATE catalog_products SET \
             title       = $2, \
             description = $3, \
             image_urls  = $4, \
             image_url   = $5, \
             price       = $6, \
             quantity    = $7, \
             sizes       = $8, \
             colors      = $9, \
             materials   = $10, \
             category    = $11, \
             status      = $12, \
             updated_at  = NOW() \
         WHERE sku = $1",
    )
    .bind(&row.sku)
    .bind(&row.title)
    .bind(&row.description)
    .bind(&row.image_urls)
    .bind(&row.image_url)
    .bind(&row.price)
    .bind(row.quantity)
    .bind(&row.sizes)
    .bind(&row.colors)
    .bind(&row.materials)
    .bind(&row.category)
    .bind(&row.status)
    .execute(pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Deletes every row whose SKU is in `skus` with a single statement.
///
/// Returns the number of rows removed. An empty slice is a no-op and issues
/// no query.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_catalog_rows(pool: &PgPool, skus: &[String]) -> Result<u64, DbError> {
    if skus.is_empty() {
        return Ok(0);
    }

    let rows_affected = sqlx::query("DELETE FROM catalog_products WHERE sku = ANY($1)")
        .bind(skus)
        .execute(pool)
        .await?
        .rows_affected();

    tracing::debug!(requested = skus.len(), deleted = rows_affected, "deleted catalog rows");
    Ok(rows_affected)
}
