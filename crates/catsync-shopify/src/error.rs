use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The GraphQL endpoint answered 200 but reported query-level errors.
    ///
    /// `body` is the pretty-printed response body, kept for diagnosis.
    #[error("GraphQL query failed: {message}\n{body}")]
    RemoteQuery { message: String, body: String },

    #[error("unexpected HTTP status {status} from Shopify: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid shop \"{shop}\": {reason}")]
    InvalidShop { shop: String, reason: String },
}

/// Reasons a remote product cannot be turned into a catalog row.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("product {product_id} has no variants")]
    MissingVariant { product_id: String },

    #[error("product {product_id}: first variant has no SKU")]
    MissingSku { product_id: String },

    #[error("product {product_id}: failed to encode {field}: {source}")]
    Encode {
        product_id: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
