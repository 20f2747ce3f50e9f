//! Turns a configured shop into the base URL of its Admin API.

use reqwest::Url;

use crate::error::ShopifyError;

/// Returns the scheme+host origin for a shop.
///
/// Accepts a bare domain (`my-store.myshopify.com`, assumed HTTPS) or a full
/// URL; any path, query or trailing slash is dropped.
///
/// # Errors
///
/// Returns [`ShopifyError::InvalidShop`] if the shop is empty or does not
/// parse as a URL with a host.
pub fn shop_base_url(shop: &str) -> Result<String, ShopifyError> {
    let trimmed = shop.trim();
    if trimmed.is_empty() {
        return Err(ShopifyError::InvalidShop {
            shop: shop.to_owned(),
            reason: "shop is empty".to_string(),
        });
    }

    let with_scheme = if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| ShopifyError::InvalidShop {
        shop: shop.to_owned(),
        reason: e.to_string(),
    })?;

    if url.host_str().is_none() {
        return Err(ShopifyError::InvalidShop {
            shop: shop.to_owned(),
            reason: "shop has no host".to_string(),
        });
    }

    Ok(url.origin().ascii_serialization())
}
