//! `GET /openapi.json`

use axum::http::StatusCode;
use tests::harness::{gateway, get};
use wiremock::MockServer;

#[tokio::test]
async fn test_document_describes_public_routes() {
    let mock_server = MockServer::start().await;

    let (status, doc) = get(gateway(&mock_server), "/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert!(doc["info"]["title"].as_str().unwrap().contains("Registry API"));

    let paths = doc["paths"].as_object().unwrap();
    for path in ["/servers", "/servers/{qualifiedName}", "/create-websocket-url"] {
        assert!(paths.contains_key(path), "missing {}", path);
    }

    assert_eq!(paths["/servers"]["get"]["summary"], "List MCP Servers");
    assert_eq!(
        paths["/servers/{qualifiedName}"]["get"]["summary"],
        "Get Server Details"
    );
    assert_eq!(
        paths["/create-websocket-url"]["post"]["summary"],
        "Create WebSocket URL"
    );
}

#[tokio::test]
async fn test_document_marks_registry_routes_as_bearer_protected() {
    let mock_server = MockServer::start().await;

    let (_, doc) = get(gateway(&mock_server), "/openapi.json", None).await;

    assert_eq!(
        doc["components"]["securitySchemes"]["bearer_auth"]["scheme"],
        "bearer"
    );
    assert!(doc["paths"]["/servers"]["get"]["security"].is_array());
    assert!(doc["paths"]["/create-websocket-url"]["post"]
        .get("security")
        .is_none());

    let mut names: Vec<&str> = doc["paths"]["/servers"]["get"]["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["page", "pageSize", "q"]);
}
