pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod query;
pub mod types;

pub use client::{ProductPages, ShopifyClient, MAX_PAGES};
pub use error::{NormalizeError, ShopifyError};
pub use normalize::normalize_product;
pub use types::{ShopifyImage, ShopifyProduct, ShopifyVariant};
