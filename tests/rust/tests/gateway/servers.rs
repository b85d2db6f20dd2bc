//! List and detail endpoints end to end

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::fixtures::{self, BEARER};
use tests::harness::{gateway, gateway_with_timeout, get};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_servers_passthrough() {
    tests::init_test_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .and(query_param("q", "search"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "5"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::server_list()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get(
        gateway(&mock_server),
        "/servers?q=search&page=2&pageSize=5",
        Some(BEARER),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, fixtures::server_list());
}

#[tokio::test]
async fn test_list_servers_without_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("pageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::server_list()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, _) = get(gateway(&mock_server), "/servers", Some(BEARER)).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_servers_strips_unknown_fields() {
    let mock_server = MockServer::start().await;

    let mut upstream = fixtures::server_list();
    upstream["servers"][0]["internalScore"] = json!(0.97);
    upstream["debug"] = json!({"shard": 3});

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream))
        .mount(&mock_server)
        .await;

    let (status, body) = get(gateway(&mock_server), "/servers", Some(BEARER)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, fixtures::server_list());
}

#[tokio::test]
async fn test_invalid_page_is_invalid_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::server_list()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = get(
        gateway(&mock_server),
        "/servers?page=two",
        Some(BEARER),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_get_server_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/@acme/search"))
        .and(header("authorization", BEARER))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixtures::server_detail("@acme/search")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get(
        gateway(&mock_server),
        "/servers/@acme/search",
        Some(BEARER),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qualifiedName"], "@acme/search");
    assert_eq!(body["connections"][0]["type"], "ws");
    assert_eq!(body["connections"][1]["type"], "stdio");
    assert_eq!(body["connections"][1]["url"], serde_json::Value::Null);
    assert_eq!(
        body["connections"][0]["configSchema"]["required"],
        json!(["apiKey"])
    );
}

#[tokio::test]
async fn test_get_server_upstream_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get(gateway(&mock_server), "/servers/missing", Some(BEARER)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains(r#"{"error":"not found"}"#), "detail: {}", detail);
}

#[tokio::test]
async fn test_upstream_server_error_status_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get(gateway(&mock_server), "/servers", Some(BEARER)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Registry API error: database on fire");
}

#[tokio::test]
async fn test_malformed_upstream_body_is_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"qualifiedName": "acme"})))
        .mount(&mock_server)
        .await;

    let (status, _) = get(gateway(&mock_server), "/servers/acme", Some(BEARER)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_slow_upstream_is_gateway_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::server_list())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let router = gateway_with_timeout(&mock_server, Duration::from_millis(200));
    let (status, body) = get(router, "/servers", Some(BEARER)).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["detail"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_unknown_connection_kind_passes_through() {
    let mock_server = MockServer::start().await;

    let mut upstream = fixtures::server_detail("@acme/search");
    upstream["connections"][1] = json!({
        "type": "sse",
        "url": "https://server.smithery.ai/@acme/search/sse",
        "configSchema": {}
    });

    Mock::given(method("GET"))
        .and(path("/servers/@acme/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .mount(&mock_server)
        .await;

    let (status, body) = get(
        gateway(&mock_server),
        "/servers/@acme/search",
        Some(BEARER),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream);
}
