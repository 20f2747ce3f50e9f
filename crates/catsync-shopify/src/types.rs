//! Admin GraphQL response types for the `getProducts` query.
//!
//! ## Shape notes
//!
//! ### Connections
//! Nested lists (`images`, `variants`, `metafields`) arrive as Relay
//! connections: `{ "edges": [ { "node": { ... } } ] }`. They are flattened
//! into plain `Vec`s at deserialization time via [`flatten_edges`]; only the
//! top-level `products` connection keeps its `pageInfo`.
//!
//! ### `inventoryQuantity`
//! `null` when the store does not track inventory for the variant. Modelled
//! as `Option<i32>`.
//!
//! ### `sku`
//! `null` or `""` when the merchant never set one. Such products cannot be
//! keyed locally and are rejected during normalization.
//!
//! ### `status`
//! One of `ACTIVE`, `DRAFT`, `ARCHIVED`, passed through verbatim.

use serde::{Deserialize, Deserializer};

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A query-level error reported by the GraphQL endpoint.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

/// One page of the top-level `products` connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub page_info: PageInfo,
    pub edges: Vec<Edge<ShopifyProduct>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

/// Deserializes a Relay connection directly into the list of its nodes.
fn flatten_edges<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let connection = Option::<Connection<T>>::deserialize(deserializer)?;
    Ok(connection
        .map(|c| c.edges.into_iter().map(|e| e.node).collect())
        .unwrap_or_default())
}

/// A single product node.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyProduct {
    /// Global ID, e.g. `gid://shopify/Product/1234567890`.
    pub id: String,
    pub title: String,
    /// Plain-text description (HTML stripped by Shopify).
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub status: String,
    /// Ordered image gallery; the first entry is the primary image.
    #[serde(default, deserialize_with = "flatten_edges")]
    pub images: Vec<ShopifyImage>,
    #[serde(default, deserialize_with = "flatten_edges")]
    pub variants: Vec<ShopifyVariant>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyImage {
    pub original_src: String,
}

/// A purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyVariant {
    /// Decimal price string, e.g. `"29.00"`.
    pub price: String,
    #[serde(default)]
    pub inventory_quantity: Option<i32>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    /// Fetched for completeness; not stored locally.
    #[serde(default, deserialize_with = "flatten_edges")]
    pub metafields: Vec<Metafield>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Metafield {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}
