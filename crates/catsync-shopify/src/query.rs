//! The Admin GraphQL document used to page through the product catalog.
//!
//! Connection sizes are upper bounds: products beyond 5 images, 100 variants
//! or 4 metafields per variant are silently truncated by the API.

/// Products requested per page.
pub const PRODUCTS_PER_PAGE: u32 = 100;

pub const PRODUCTS_QUERY: &str = r"
query getProducts($cursor: String) {
  products(first: 100, after: $cursor) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        id
        title
        description
        productType
        status
        images(first: 5) {
          edges {
            node {
              originalSrc
            }
          }
        }
        variants(first: 100) {
          edges {
            node {
              price
              inventoryQuantity
              sku
              selectedOptions {
                name
                value
              }
              metafields(first: 4) {
                edges {
                  node {
                    key
                    value
                    namespace
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
";
