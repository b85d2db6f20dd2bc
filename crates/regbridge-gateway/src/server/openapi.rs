//! OpenAPI document served at `GET /openapi.json`

use axum::response::Json;
use regbridge_core::branding;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        description = "OpenAPI server for Smithery Registry, providing access to search and obtain launch configurations for MCP servers."
    ),
    paths(
        handlers::health,
        handlers::list_servers,
        handlers::get_server,
        handlers::create_websocket_url,
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "registry", description = "Forwarded registry search and lookup"),
        (name = "connection", description = "Local connection URL builder"),
        (name = "gateway", description = "Gateway status"),
    )
)]
struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the registry routes
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Build the OpenAPI document for this gateway
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = format!("{} Registry API Server", branding::DISPLAY_NAME);
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc())
}
