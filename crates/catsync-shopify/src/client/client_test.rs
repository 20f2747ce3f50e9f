use super::*;

fn test_client(base_url: &str) -> ShopifyClient {
    ShopifyClient::with_base_url(base_url, "shpat_test", "2024-10", 5, "catsync-test/0.1")
        .expect("failed to build test client")
}

#[test]
fn endpoint_includes_api_version() {
    let client = test_client("https://my-store.myshopify.com");
    assert_eq!(
        client.endpoint(),
        "https://my-store.myshopify.com/admin/api/2024-10/graphql.json"
    );
}

#[test]
fn endpoint_strips_trailing_slash_from_base() {
    let client = test_client("http://127.0.0.1:9999/");
    assert_eq!(
        client.endpoint(),
        "http://127.0.0.1:9999/admin/api/2024-10/graphql.json"
    );
}

#[test]
fn new_accepts_bare_shop_domain() {
    let client = ShopifyClient::new("my-store.myshopify.com", "t", "2024-10", 5, "ua")
        .expect("client");
    assert_eq!(
        client.endpoint(),
        "https://my-store.myshopify.com/admin/api/2024-10/graphql.json"
    );
}

#[test]
fn parse_products_page_reads_page_info_and_edges() {
    let body = r#"{
        "data": { "products": {
            "pageInfo": { "hasNextPage": true, "endCursor": "CURSOR_1" },
            "edges": [ { "node": { "id": "gid://shopify/Product/1", "title": "A" } } ]
        } }
    }"#;
    let page = parse_products_page(body).expect("page");
    assert!(page.page_info.has_next_page);
    assert_eq!(page.page_info.end_cursor.as_deref(), Some("CURSOR_1"));
    assert_eq!(page.edges.len(), 1);
    assert_eq!(page.edges[0].node.title, "A");
}

#[test]
fn parse_products_page_surfaces_graphql_errors_with_body() {
    let body = r#"{"errors":[{"message":"Throttled"},{"message":"Field 'foo' doesn't exist"}],"data":{"products":null}}"#;
    let err = parse_products_page(body).unwrap_err();
    match err {
        ShopifyError::RemoteQuery { message, body } => {
            assert_eq!(message, "Throttled; Field 'foo' doesn't exist");
            assert!(body.contains("\"Throttled\""));
            assert!(body.contains('\n'), "body should be pretty-printed");
        }
        other => panic!("expected RemoteQuery, got {other:?}"),
    }
}

#[test]
fn parse_products_page_without_data_is_a_query_error() {
    let err = parse_products_page("{}").unwrap_err();
    assert!(
        matches!(err, ShopifyError::RemoteQuery { ref message, .. } if message.contains("no data"))
    );
}

#[test]
fn parse_products_page_rejects_non_json() {
    let err = parse_products_page("<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, ShopifyError::Deserialize { .. }));
}

#[test]
fn pretty_body_falls_back_to_raw_text() {
    assert_eq!(pretty_body("not json"), "not json");
}
