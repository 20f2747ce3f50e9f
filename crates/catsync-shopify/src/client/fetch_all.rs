//! Multi-page product fetch for `ShopifyClient`.

use crate::error::ShopifyError;
use crate::pagination::PageCursor;
use crate::types::ShopifyProduct;

use super::{ShopifyClient, MAX_PAGES};

/// A lazy walk over the `products` connection.
///
/// Each call to [`ProductPages::next_page`] issues at most one request.
/// A walk cannot be rewound; start a fresh one with [`ShopifyClient::pages`]
/// for each run.
pub struct ProductPages<'a> {
    client: &'a ShopifyClient,
    cursor: PageCursor,
    pages_fetched: usize,
}

impl ProductPages<'_> {
    /// Fetches the next page, or returns `Ok(None)` once the connection
    /// reports no more pages.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ShopifyClient::fetch_products_page`].
    /// Returns [`ShopifyError::PaginationLimit`] if more than [`MAX_PAGES`]
    /// pages would be requested.
    pub async fn next_page(&mut self) -> Result<Option<Vec<ShopifyProduct>>, ShopifyError> {
        if self.cursor.is_done() {
            return Ok(None);
        }
        if self.pages_fetched >= MAX_PAGES {
            return Err(ShopifyError::PaginationLimit {
                max_pages: MAX_PAGES,
            });
        }

        let connection = self
            .client
            .fetch_products_page(self.cursor.request_cursor())
            .await?;
        self.pages_fetched += 1;
        self.cursor.advance(&connection.page_info);

        tracing::debug!(
            page = self.pages_fetched,
            products = connection.edges.len(),
            has_next_page = connection.page_info.has_next_page,
            "fetched products page"
        );

        Ok(Some(connection.edges.into_iter().map(|e| e.node).collect()))
    }

    /// Number of pages requested so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl ShopifyClient {
    /// Starts a new page walk from the beginning of the catalog.
    #[must_use]
    pub fn pages(&self) -> ProductPages<'_> {
        ProductPages {
            client: self,
            cursor: PageCursor::new(),
            pages_fetched: 0,
        }
    }

    /// Fetches the whole catalog by following cursors until the last page.
    ///
    /// All-or-nothing: if any page fails, products from earlier pages are
    /// discarded and the error is returned, since a partial catalog would
    /// make every missing SKU look deleted.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ProductPages::next_page`].
    pub async fn fetch_all_products(&self) -> Result<Vec<ShopifyProduct>, ShopifyError> {
        let mut pages = self.pages();
        let mut all_products: Vec<ShopifyProduct> = Vec::new();

        while let Some(page) = pages.next_page().await? {
            all_products.extend(page);
        }

        tracing::info!(
            pages = pages.pages_fetched(),
            products = all_products.len(),
            "fetched full product catalog"
        );
        Ok(all_products)
    }
}
