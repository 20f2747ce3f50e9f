use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

/// One catalog row as served by `GET /api/products`.
///
/// List columns are passed through as the JSON-array strings stored in the
/// table.
#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    sku: String,
    title: String,
    description: String,
    image_urls: String,
    image_url: Option<String>,
    price: String,
    quantity: Option<i32>,
    sizes: String,
    colors: String,
    materials: String,
    category: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<catsync_db::CatalogProductRow> for ProductItem {
    fn from(row: catsync_db::CatalogProductRow) -> Self {
        Self {
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
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Returns the whole catalog table as a bare JSON array, ordered by SKU.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<ProductItem>>, ApiError> {
    let rows = catsync_db::list_catalog_rows(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(rows.into_iter().map(ProductItem::from).collect()))
}
