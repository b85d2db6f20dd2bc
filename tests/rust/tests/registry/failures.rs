//! Upstream failures: status propagation, schema checks, timeouts

use std::time::Duration;

use regbridge_core::{BearerToken, ListServersQuery, RegistryApiClient, RegistryConfig, RegistryError};
use serde_json::json;
use tests::fixtures::{self, BEARER};
use tests::harness::{registry_client, registry_config};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> BearerToken {
    BearerToken::from_header(Some(BEARER)).unwrap()
}

#[tokio::test]
async fn test_upstream_404_preserves_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = registry_client(&mock_server)
        .get_server(&token(), "missing")
        .await
        .unwrap_err();

    match err {
        RegistryError::Upstream { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"error":"not found"}"#);
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = registry_client(&mock_server)
        .list_servers(&token(), &ListServersQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status(), Some(503));
    assert!(err.to_string().contains("maintenance"));
    // MockServer verifies `expect(1)` on drop
}

#[tokio::test]
async fn test_unauthorized_upstream_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&mock_server)
        .await;

    let err = registry_client(&mock_server)
        .list_servers(&token(), &ListServersQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status(), Some(401));
}

#[tokio::test]
async fn test_shape_mismatch_is_invalid_upstream_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
        .mount(&mock_server)
        .await;

    let err = registry_client(&mock_server)
        .list_servers(&token(), &ListServersQuery::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, RegistryError::InvalidUpstreamResponse(ref msg) if msg.contains("pagination")),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_non_json_success_is_invalid_upstream_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servers/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = registry_client(&mock_server)
        .get_server(&token(), "acme")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::InvalidUpstreamResponse(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
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

    let config = registry_config(&mock_server).with_timeout(Duration::from_millis(200));
    let client = RegistryApiClient::new(&config).unwrap();

    let err = client
        .list_servers(&token(), &ListServersQuery::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, RegistryError::GatewayTimeout { timeout } if timeout == Duration::from_millis(200)),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_unreachable_registry_is_network_error() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RegistryConfig::default()
        .with_base_url(format!("http://{}", addr))
        .with_timeout(Duration::from_secs(5));
    let client = RegistryApiClient::new(&config).unwrap();

    let err = client
        .list_servers(&token(), &ListServersQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Network(_)), "got {:?}", err);
}
