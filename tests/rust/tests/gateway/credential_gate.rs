//! Credential gate: rejected credentials never reach the registry

use axum::http::StatusCode;
use tests::harness::{gateway, get, post_json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn registry_expecting_no_calls() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_missing_header_rejected_without_network() {
    let mock_server = registry_expecting_no_calls().await;

    let (status, body) = get(gateway(&mock_server), "/servers", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Missing authorization header");
}

#[tokio::test]
async fn test_wrong_scheme_rejected_without_network() {
    let mock_server = registry_expecting_no_calls().await;

    for header in ["test-token-123", "Basic dXNlcjpwYXNz", "bearer test-token-123"] {
        let (status, body) = get(gateway(&mock_server), "/servers", Some(header)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header);
        assert_eq!(body["detail"], "Invalid authorization header format");
    }
}

#[tokio::test]
async fn test_empty_token_rejected_without_network() {
    let mock_server = registry_expecting_no_calls().await;

    let (status, body) = get(gateway(&mock_server), "/servers/@acme/search", Some("Bearer ")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "No token provided");
}

#[tokio::test]
async fn test_detail_route_is_gated() {
    let mock_server = registry_expecting_no_calls().await;

    let (status, _) = get(gateway(&mock_server), "/servers/@acme/search", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_checked_before_query_validation() {
    let mock_server = registry_expecting_no_calls().await;

    let (status, _) = get(gateway(&mock_server), "/servers?page=abc", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_need_no_credential() {
    let mock_server = registry_expecting_no_calls().await;

    let (status, body) = get(gateway(&mock_server), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = post_json(
        gateway(&mock_server),
        "/create-websocket-url",
        r#"{"qualifiedName":"acme/tool","config":{}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
