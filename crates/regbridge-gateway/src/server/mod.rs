//! Gateway Server
//!
//! HTTP server exposing the registry search, lookup and connection URL
//! endpoints.

mod handlers;
pub mod logging_middleware;
pub mod openapi;

pub use handlers::{AppState, HealthResponse};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use regbridge_core::config::parse_var;
use regbridge_core::{branding, ConfigError, RegistryApiClient, RegistryConfig, RegistryResult};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Gateway server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Upstream registry settings
    pub registry: RegistryConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: branding::DEFAULT_GATEWAY_PORT,
            enable_cors: true,
            registry: RegistryConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `REGBRIDGE_HOST`, `REGBRIDGE_PORT`,
    /// `REGBRIDGE_CORS` and the registry variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            registry: RegistryConfig::from_lookup(&lookup)?,
            ..Self::default()
        };

        if let Some(host) = lookup(&branding::env_var("HOST")) {
            config.host = host;
        }
        if let Some(port) = parse_var::<u16, _>(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(cors) = parse_var::<bool, _>(&lookup, "CORS")? {
            config.enable_cors = cors;
        }

        Ok(config)
    }

    /// Address to bind, as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the base URL for this gateway
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Registry Gateway Server
///
/// Owns the outbound registry client; every request is otherwise
/// independent.
pub struct GatewayServer {
    config: GatewayConfig,
    registry: RegistryApiClient,
}

impl GatewayServer {
    /// Create a new gateway server
    ///
    /// Builds the shared outbound HTTP client once.
    pub fn new(config: GatewayConfig) -> RegistryResult<Self> {
        let registry = RegistryApiClient::new(&config.registry)?;
        info!(
            "[Gateway] Registry: {} (timeout {:?})",
            registry.base_url(),
            config.registry.timeout
        );
        Ok(Self { config, registry })
    }

    /// Gateway configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        let app_state = AppState {
            registry: self.registry.clone(),
            connection_host: self.config.registry.connection_host.clone(),
        };

        let mut router = Router::new()
            // Health check and API document (public)
            .route("/health", get(handlers::health))
            .route("/openapi.json", get(openapi::openapi_json))
            // Registry forwarding (bearer required)
            .route("/servers", get(handlers::list_servers))
            .route("/servers/{*qualified_name}", get(handlers::get_server))
            // Local utility (public)
            .route(
                "/create-websocket-url",
                post(handlers::create_websocket_url),
            )
            .with_state(app_state)
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(
                logging_middleware::http_logging_middleware,
            ));

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Run the gateway server until Ctrl-C
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr()).await?;
        let addr = listener.local_addr()?;

        info!("[Gateway] Starting on {}", addr);
        info!(
            "[Gateway] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        let router = self.build_router();

        info!("[Gateway] Ready to accept connections");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("[Gateway] Stopped");
        Ok(())
    }

    /// Start the server in the background
    ///
    /// Returns a JoinHandle that can be used to wait for completion or abort.
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("[Gateway] Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[Gateway] Shutdown signal received");
}
