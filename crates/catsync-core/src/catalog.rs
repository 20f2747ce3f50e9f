//! The local, flattened shape of one catalog entry.

use serde::{Deserialize, Serialize};

/// One row of the local catalog table, keyed by `sku`.
///
/// List-valued fields (`image_urls`, `sizes`, `colors`, `materials`) hold a
/// JSON array serialized into a single text column, e.g. `["S","M"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub sku: String,
    pub title: String,
    pub description: String,
    pub image_urls: String,
    /// First entry of `image_urls`; `None` when the product has no images.
    pub image_url: Option<String>,
    /// Decimal price exactly as the remote API reported it (e.g. `"29.00"`).
    pub price: String,
    /// `None` when the remote store does not track inventory for the variant.
    pub quantity: Option<i32>,
    pub sizes: String,
    pub colors: String,
    pub materials: String,
    pub category: String,
    pub status: String,
}

impl CatalogRow {
    /// Names of the fields whose values differ between `self` and `other`.
    ///
    /// `sku` is the key and is not compared. An empty result means the two
    /// rows are equivalent and no write is needed.
    #[must_use]
    pub fn changed_fields(&self, other: &CatalogRow) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.title != other.title {
            changed.push("title");
        }
        if self.description != other.description {
            changed.push("description");
        }
        if self.image_urls != other.image_urls {
            changed.push("image_urls");
        }
        if self.image_url != other.image_url {
            changed.push("image_url");
        }
        if self.price != other.price {
            changed.push("price");
        }
        if self.quantity != other.quantity {
            changed.push("quantity");
        }
        if self.sizes != other.sizes {
            changed.push("sizes");
        }
        if self.colors != other.colors {
            changed.push("colors");
        }
        if self.materials != other.materials {
            changed.push("materials");
        }
        if self.category != other.category {
            changed.push("category");
        }
        if self.status != other.status {
            changed.push("status");
        }
        changed
    }
}
