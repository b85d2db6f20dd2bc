//! HTTP handlers for the gateway server

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use regbridge_core::{
    build_connection_url, ConnectionUrlRequest, ConnectionUrlResponse, ListServersQuery,
    RegistryApiClient, ServerDetailResponse, ServerListResponse,
};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::auth::RegistryAuth;
use crate::error::{ErrorBody, GatewayError};

/// Shared state for all handlers
///
/// Holds no per-request data; the registry client is the only shared
/// resource.
#[derive(Clone)]
pub struct AppState {
    pub registry: RegistryApiClient,
    pub connection_host: String,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Gateway is up", body = HealthResponse)),
    tag = "gateway"
)]
pub async fn health() -> Json<HealthResponse> {
    debug!("[Gateway] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List MCP Servers
///
/// Search and list available MCP servers with optional filtering. Only the
/// supplied query parameters are forwarded to the registry.
#[utoipa::path(
    get,
    path = "/servers",
    params(ListServersQuery),
    responses(
        (status = 200, description = "One page of search results", body = ServerListResponse),
        (status = 401, description = "Missing or malformed bearer credential", body = ErrorBody),
        (status = 422, description = "Invalid query parameters", body = ErrorBody),
        (status = 502, description = "Registry unreachable or returned an unexpected shape", body = ErrorBody),
        (status = 504, description = "Registry timed out", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn list_servers(
    RegistryAuth(token): RegistryAuth,
    State(state): State<AppState>,
    query: Result<Query<ListServersQuery>, QueryRejection>,
) -> Result<Json<ServerListResponse>, GatewayError> {
    let Query(query) = query?;

    info!(
        "[Gateway] List servers: q={:?} page={:?} pageSize={:?}",
        query.q, query.page, query.page_size
    );

    let response = state.registry.list_servers(&token, &query).await?;
    Ok(Json(response))
}

/// Get Server Details
///
/// Get detailed information about a specific MCP server including connection
/// configuration. The qualified name may span several path segments
/// (e.g. `@acme/tool`).
#[utoipa::path(
    get,
    path = "/servers/{qualifiedName}",
    params(("qualifiedName" = String, Path, description = "Qualified name of the server")),
    responses(
        (status = 200, description = "Server record", body = ServerDetailResponse),
        (status = 401, description = "Missing or malformed bearer credential", body = ErrorBody),
        (status = 404, description = "Unknown server (registry status passed through)", body = ErrorBody),
        (status = 502, description = "Registry unreachable or returned an unexpected shape", body = ErrorBody),
        (status = 504, description = "Registry timed out", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn get_server(
    RegistryAuth(token): RegistryAuth,
    State(state): State<AppState>,
    qualified_name: Result<Path<String>, PathRejection>,
) -> Result<Json<ServerDetailResponse>, GatewayError> {
    let Path(qualified_name) = qualified_name?;

    info!("[Gateway] Get server: {}", qualified_name);

    let response = state.registry.get_server(&token, &qualified_name).await?;
    Ok(Json(response))
}

/// Create WebSocket URL
///
/// Create a complete WebSocket URL with base64-encoded config for connecting
/// to an MCP server. Local only; no credential required.
#[utoipa::path(
    post,
    path = "/create-websocket-url",
    request_body = ConnectionUrlRequest,
    responses(
        (status = 200, description = "Connection URL built", body = ConnectionUrlResponse),
        (status = 413, description = "Request body too large"),
        (status = 422, description = "Malformed request body", body = ErrorBody),
    ),
    tag = "connection"
)]
pub async fn create_websocket_url(
    State(state): State<AppState>,
    payload: Result<Json<ConnectionUrlRequest>, JsonRejection>,
) -> Result<Json<ConnectionUrlResponse>, GatewayError> {
    let Json(request) = payload?;

    let ws_url = build_connection_url(
        &state.connection_host,
        &request.qualified_name,
        &request.config,
    )?;

    info!(
        "[Gateway] Built connection URL for {} ({} config keys)",
        request.qualified_name,
        request.config.len()
    );

    Ok(Json(ConnectionUrlResponse { ws_url }))
}
