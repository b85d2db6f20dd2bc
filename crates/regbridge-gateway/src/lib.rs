//! RegBridge Gateway
//!
//! HTTP front end for the server registry:
//! - Bearer credential gate for forwarded calls
//! - Registry search and lookup forwarding with response shape checks
//! - Local connection URL builder
//! - Request logging with trace IDs

pub mod auth;
pub mod error;
pub mod logging;
pub mod server;

pub use auth::RegistryAuth;
pub use error::{ErrorBody, GatewayError};
pub use server::{AppState, GatewayConfig, GatewayServer};
