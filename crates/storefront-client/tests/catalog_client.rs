//! Integration tests for `CatalogClient` against a local `wiremock` server.
//!
//! Covers both envelope shapes on the happy path, filter propagation, id
//! encoding, and how each failure mode lands in the error taxonomy.

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_client::{
    normalize_api_response, normalize_products, CatalogClient, ErrorClass, FetchError,
    ProductSource,
};
use storefront_core::{CatalogConfig, FilterPatch, Filters};

fn config_for(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        base_api_url: format!("{}/api", server.uri()),
        request_timeout_ms: 5_000,
        ..CatalogConfig::default()
    }
}

fn test_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&config_for(server), "storefront-test/0.1")
        .expect("failed to build test CatalogClient")
}

// ---------------------------------------------------------------------------
// Successful responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_products_returns_bare_array_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "brand": "Sony", "model": "XM5", "price": 349},
            {"id": 2, "brand": "Bose", "model": "QC45", "price": "279.00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let payload = test_client(&server).fetch_products(None).await.unwrap();
    let items = normalize_api_response(payload);
    let batch = normalize_products(&items, &config_for(&server));

    assert_eq!(batch.products.len(), 2);
    assert_eq!(batch.dropped, 0);
    assert_eq!(batch.products[1].price, Decimal::new(279, 0));
}

#[tokio::test]
async fn fetch_products_unwraps_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "a", "brand": "JBL", "title": "Flip 6"}],
            "meta": {"total": 1}
        })))
        .mount(&server)
        .await;

    let payload = test_client(&server).fetch_products(None).await.unwrap();
    let items = normalize_api_response(payload);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["brand"], "JBL");
}

#[tokio::test]
async fn fetch_products_sends_active_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("q", "wireless"))
        .and(query_param("brand", "Sony"))
        .and(query_param("stock", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut filters = Filters::default();
    filters.apply(
        FilterPatch::search("wireless")
            .with_brands(["Sony"])
            .with_in_stock_only(true),
    );

    let payload = test_client(&server)
        .fetch_products(Some(&filters))
        .await
        .unwrap();
    assert!(normalize_api_response(payload).is_empty());
}

#[tokio::test]
async fn fetch_product_by_id_hits_encoded_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/sku%201"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "sku 1", "brand": "Apple", "name": "AirPods"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = test_client(&server)
        .fetch_product_by_id("sku 1")
        .await
        .unwrap();
    assert_eq!(payload["name"], "AirPods");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_is_client_class_without_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product_by_id("missing")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.class(), ErrorClass::Client { status: 404 });
    assert!(!err.class().triggers_fallback());
}

#[tokio::test]
async fn server_error_is_server_class() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_products(None).await.unwrap_err();

    assert!(
        matches!(err, FetchError::Status { status: 503, .. }),
        "expected Status 503, got: {err:?}"
    );
    assert_eq!(err.class(), ErrorClass::Server { status: 503 });
    assert!(err.class().triggers_fallback());
}

#[tokio::test]
async fn non_json_body_is_validation_class() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_products(None).await.unwrap_err();

    assert!(
        matches!(err, FetchError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
    assert_eq!(err.class(), ErrorClass::Validation);
    assert!(err.class().triggers_fallback());
}

#[tokio::test]
async fn unreachable_server_is_network_class() {
    let config = CatalogConfig {
        base_api_url: "http://127.0.0.1:1/api".to_owned(),
        request_timeout_ms: 2_000,
        ..CatalogConfig::default()
    };
    let client = CatalogClient::new(&config, "storefront-test/0.1").unwrap();

    let err = client.fetch_products(None).await.unwrap_err();

    assert_eq!(err.status(), None);
    assert_eq!(err.class(), ErrorClass::Network);
    assert!(err.class().triggers_fallback());
}
