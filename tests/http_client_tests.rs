//! Integration tests for the HTTP transport.
//!
//! These tests check what actually reaches the wire: default headers, the
//! `Host` override for a custom API host, request bodies, and the retry
//! decision for non-retryable statuses.

use shopify_discount_codes::clients::{DataType, HttpClient, HttpMethod, HttpRequest};
use shopify_discount_codes::{
    HostUrl, HttpError, InvalidHttpRequestError, RestClient, Session, ShopifyConfig,
};
use wiremock::matchers::{body_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_session() -> Session {
    Session::from_parts("test-shop", "test-token").unwrap()
}

fn config_for(server: &MockServer) -> ShopifyConfig {
    ShopifyConfig::builder()
        .api_host(HostUrl::new(server.uri()).unwrap())
        .user_agent_prefix("PromoSync/2.1")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_request_carries_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/price_rules/1/discount_codes.json"))
        .and(header("X-Shopify-Access-Token", "test-token"))
        .and(header("Accept", "application/json"))
        .and(header("Host", "test-shop.myshopify.com"))
        .and(header_regex(
            "User-Agent",
            r"^PromoSync/2\.1 \| Shopify Discount Codes Library v",
        ))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let session = create_test_session();
    let config = config_for(&server);
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config)).unwrap();

    let request = HttpRequest::builder(HttpMethod::Get, "price_rules/1/discount_codes.json")
        .query_param("limit", "50")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.body["ok"], true);
}

#[tokio::test]
async fn test_post_sends_json_body_and_extra_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/api/2025-10/price_rules/1/batch.json"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-Trace", "abc"))
        .and(body_json(serde_json::json!({"discount_codes": [{"code": "X"}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let session = create_test_session();
    let config = config_for(&server);
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config)).unwrap();

    let request = HttpRequest::builder(HttpMethod::Post, "price_rules/1/batch.json")
        .body(serde_json::json!({"discount_codes": [{"code": "X"}]}))
        .body_type(DataType::Json)
        .header("X-Trace", "abc")
        .build()
        .unwrap();

    assert_eq!(client.request(request).await.unwrap().code, 201);
}

#[tokio::test]
async fn test_server_error_is_not_retried_with_single_try() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/price_rules/1/discount_codes/2.json"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("X-Request-Id", "req-500")
                .set_body_string("Internal Server Error"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = create_test_session();
    let config = config_for(&server);
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config)).unwrap();

    let request = HttpRequest::builder(HttpMethod::Get, "price_rules/1/discount_codes/2.json")
        .build()
        .unwrap();
    let error = client.request(request).await.unwrap_err();

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 500);
            assert_eq!(e.error_reference.as_deref(), Some("req-500"));
            assert!(e.message.contains("Internal Server Error"));
        }
        other => panic!("Expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_deprecated_response_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/discount_codes/lookup.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Shopify-API-Deprecated-Reason", "https://shopify.dev/changelog")
                .set_body_json(serde_json::json!({"discount_code": {"id": 1}})),
        )
        .mount(&server)
        .await;

    let session = create_test_session();
    let config = config_for(&server);
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config)).unwrap();

    let request = HttpRequest::builder(HttpMethod::Get, "discount_codes/lookup.json")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(
        response.deprecation_reason(),
        Some("https://shopify.dev/changelog")
    );
}

#[tokio::test]
async fn test_rest_client_normalizes_paths_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/api/2025-10/price_rules/1/discount_codes/2.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = create_test_session();
    let config = ShopifyConfig::builder()
        .api_host(HostUrl::new(server.uri()).unwrap())
        .api_version("2025-10".parse().unwrap())
        .build()
        .unwrap();
    let client = RestClient::new(&session, Some(&config)).unwrap();

    let response = client
        .delete("/price_rules/1/discount_codes/2.json", None)
        .await
        .unwrap();

    assert_eq!(response.code, 204);
    assert_eq!(response.body, serde_json::json!({}));
}

#[test]
fn test_invalid_request_is_rejected_before_sending() {
    let result = HttpRequest::builder(HttpMethod::Put, "price_rules/1.json").build();

    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingBody { .. })
    ));
}
