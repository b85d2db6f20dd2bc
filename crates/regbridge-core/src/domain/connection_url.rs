use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Request body of `POST /create-websocket-url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionUrlRequest {
    /// Server identifier
    pub qualified_name: String,
    /// Configuration matching the server's configSchema (not validated here)
    #[schema(value_type = Object)]
    pub config: Map<String, Value>,
}

/// Response body of `POST /create-websocket-url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionUrlResponse {
    /// Complete WebSocket URL with encoded config
    pub ws_url: String,
}
