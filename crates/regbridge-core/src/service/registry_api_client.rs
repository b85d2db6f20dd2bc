//! HTTP client for the upstream server registry.
//!
//! Every call is a single round trip: no retry, no caching. The caller's
//! bearer token is forwarded as-is and the response body is checked against
//! the fixed response schema before it is handed back.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use utoipa::IntoParams;

use crate::auth::BearerToken;
use crate::branding;
use crate::config::RegistryConfig;
use crate::domain::{ServerDetailResponse, ServerListResponse};
use crate::error::{RegistryError, RegistryResult};

/// Search and pagination parameters for `GET /servers`
///
/// Only fields that are set are forwarded; the registry applies its own
/// defaults for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListServersQuery {
    /// Search query (semantic search)
    pub q: Option<String>,
    /// Page number
    pub page: Option<u32>,
    /// Items per page
    pub page_size: Option<u32>,
}

impl ListServersQuery {
    /// Query pairs to send upstream, in a stable order.
    ///
    /// An empty search string counts as absent.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            params.push(("q", q.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        params
    }
}

/// Client for the registry API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RegistryApiClient {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl RegistryApiClient {
    /// Create a new registry client from configuration
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RegistryError::Internal(format!(
                "invalid registry base URL {:?}: {}",
                config.base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::Internal(format!(
                "registry base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(branding::user_agent())
            .build()
            .map_err(|e| RegistryError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            timeout: config.timeout,
            client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Search the registry: `GET /servers`
    pub async fn list_servers(
        &self,
        token: &BearerToken,
        query: &ListServersQuery,
    ) -> RegistryResult<ServerListResponse> {
        let url = self.endpoint(["servers"])?;
        let params = query.to_params();

        debug!(url = %url, params = ?params, "Forwarding server search to registry");

        let response: ServerListResponse = self
            .send_json(self.client.get(url).query(&params), token)
            .await?;

        debug!(
            "Registry returned {} servers (page {}/{}, {} total)",
            response.servers.len(),
            response.pagination.current_page,
            response.pagination.total_pages,
            response.pagination.total_count
        );

        Ok(response)
    }

    /// Look up a single server: `GET /servers/{qualifiedName}`
    ///
    /// Qualified names may contain `/`; each part becomes its own
    /// percent-encoded path segment.
    pub async fn get_server(
        &self,
        token: &BearerToken,
        qualified_name: &str,
    ) -> RegistryResult<ServerDetailResponse> {
        let segments = std::iter::once("servers").chain(qualified_name.split('/'));
        let url = self.endpoint(segments)?;

        debug!(url = %url, "Forwarding server lookup to registry");

        let response: ServerDetailResponse =
            self.send_json(self.client.get(url), token).await?;

        debug!(
            "Registry returned {} connections for {}",
            response.connections.len(),
            response.qualified_name
        );

        Ok(response)
    }

    fn endpoint<'a, I>(&self, segments: I) -> RegistryResult<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::Internal("registry base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T>(&self, request: RequestBuilder, token: &BearerToken) -> RegistryResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(reqwest::header::AUTHORIZATION, token.header_value())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Registry API returned status {}", status);
            return Err(RegistryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Registry response failed schema validation: {}", e);
            RegistryError::InvalidUpstreamResponse(e.to_string())
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> RegistryError {
        if err.is_timeout() {
            warn!("Registry API call timed out after {:?}", self.timeout);
            RegistryError::GatewayTimeout {
                timeout: self.timeout,
            }
        } else {
            warn!("Registry API call failed: {}", err);
            RegistryError::Network(err.to_string())
        }
    }
}
