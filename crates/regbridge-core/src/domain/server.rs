use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// One entry in a registry search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerSummary {
    /// Unique server identifier (e.g., "@acme/tool")
    pub qualified_name: String,
    /// Human-readable server name
    pub display_name: String,
    pub description: String,
    /// Server homepage URL
    pub homepage: String,
    /// Usage count; the registry sends it as a string
    pub use_count: String,
    /// Deployment status
    pub is_deployed: bool,
    /// Creation timestamp, passed through untouched
    pub created_at: String,
}

/// Position of one page within a larger result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    /// Items per page
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// Response body of `GET /servers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServerListResponse {
    pub servers: Vec<ServerSummary>,
    pub pagination: Pagination,
}

/// Transport a registry server can be reached over
///
/// Kinds this gateway does not know are carried through as-is, so a new
/// transport on the registry side does not break detail lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionKind {
    /// Hosted websocket endpoint
    Ws,
    /// Local process speaking over standard I/O
    Stdio,
    /// Streamable HTTP endpoint
    Http,
    /// Any other kind reported by the registry
    Other(String),
}

impl ConnectionKind {
    /// Wire name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ws => "ws",
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for ConnectionKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "ws" => Self::Ws,
            "stdio" => Self::Stdio,
            "http" => Self::Http,
            _ => Self::Other(kind),
        }
    }
}

impl From<ConnectionKind> for String {
    fn from(kind: ConnectionKind) -> Self {
        match kind {
            ConnectionKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way of connecting to a registry server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Connection type ("ws", "stdio", "http", ...)
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "ws")]
    pub kind: ConnectionKind,
    /// Connection URL if available
    #[serde(default)]
    pub url: Option<String>,
    /// JSON Schema for the configuration this server accepts
    #[schema(value_type = Object)]
    pub config_schema: Map<String, Value>,
}

/// Response body of `GET /servers/{qualifiedName}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetailResponse {
    pub qualified_name: String,
    pub display_name: String,
    pub deployment_url: String,
    /// Available connections
    pub connections: Vec<Connection>,
}
