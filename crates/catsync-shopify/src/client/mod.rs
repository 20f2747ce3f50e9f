//! HTTP client for the Shopify Admin GraphQL endpoint.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::json;

use crate::error::ShopifyError;
use crate::query::PRODUCTS_QUERY;
use crate::types::{GraphQlResponse, ProductConnection, ProductsData};

pub use fetch_all::ProductPages;
pub use origin::shop_base_url;

/// Maximum number of pages fetched in one run before giving up.
///
/// Guards against cycling cursors and bounds memory: one run holds at most
/// `MAX_PAGES * 100` products.
pub const MAX_PAGES: usize = 500;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for one shop's Admin GraphQL API.
///
/// Use [`ShopifyClient::new`] with a shop domain for production, or
/// [`ShopifyClient::with_base_url`] to point at a mock server in tests.
/// Nothing is retried: every failure is returned to the caller.
pub struct ShopifyClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl ShopifyClient {
    /// Creates a client for `shop` (e.g. `my-store.myshopify.com`).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidShop`] if the shop does not form a
    /// valid URL, or [`ShopifyError::Http`] if the `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        shop: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let base_url = shop_base_url(shop)?;
        Self::with_base_url(&base_url, access_token, api_version, timeout_secs, user_agent)
    }

    /// Creates a client from the `SHOPIFY_*` and request settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`ShopifyClient::new`].
    pub fn from_config(config: &catsync_core::AppConfig) -> Result<Self, ShopifyError> {
        Self::new(
            &config.shopify_shop,
            &config.shopify_access_token,
            &config.shopify_api_version,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client against an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidShop`] if `base_url` is not a valid URL,
    /// or [`ShopifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let raw = format!(
            "{}/admin/api/{api_version}/graphql.json",
            base_url.trim_end_matches('/')
        );
        let endpoint = Url::parse(&raw).map_err(|e| ShopifyError::InvalidShop {
            shop: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Fetches one page of the `products` connection starting after `cursor`.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ShopifyError::RemoteQuery`] when the body carries GraphQL `errors`
    ///   or no `data`.
    /// - [`ShopifyError::Deserialize`] when the body does not match the
    ///   expected shape.
    pub async fn fetch_products_page(
        &self,
        cursor: Option<&str>,
    ) -> Result<ProductConnection, ShopifyError> {
        let payload = json!({
            "query": PRODUCTS_QUERY,
            "variables": { "cursor": cursor },
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, self.access_token.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_products_page(&body)
    }
}

/// Parses a `getProducts` response body, surfacing GraphQL-level errors.
///
/// Errors are checked before `data` is interpreted: Shopify may send
/// `"data": {"products": null}` alongside them.
fn parse_products_page(body: &str) -> Result<ProductConnection, ShopifyError> {
    let parsed = serde_json::from_str::<GraphQlResponse<serde_json::Value>>(body).map_err(
        |e| ShopifyError::Deserialize {
            context: "GraphQL envelope".to_string(),
            source: e,
        },
    )?;

    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ShopifyError::RemoteQuery {
            message,
            body: pretty_body(body),
        });
    }

    let Some(data) = parsed.data else {
        return Err(ShopifyError::RemoteQuery {
            message: "response contained no data".to_string(),
            body: pretty_body(body),
        });
    };

    let data =
        serde_json::from_value::<ProductsData>(data).map_err(|e| ShopifyError::Deserialize {
            context: "products page".to_string(),
            source: e,
        })?;
    Ok(data.products)
}

/// Re-serializes a JSON body with indentation; returns it verbatim if it is
/// not valid JSON.
fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| body.to_owned())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
