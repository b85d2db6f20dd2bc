//! # RegBridge Core Library
//!
//! Domain types and services for the RegBridge registry gateway.
//!
//! ## Modules
//!
//! - `auth` - Bearer credential validation
//! - `branding` - Centralized branding constants (generated from branding.toml)
//! - `config` - Registry connection settings
//! - `domain` - Registry request/response shapes
//! - `error` - Error taxonomy
//! - `service` - Registry API client and connection URL builder

pub mod auth;
pub mod branding;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use auth::BearerToken;
pub use config::{ConfigError, RegistryConfig};
pub use domain::*;
pub use error::{RegistryError, RegistryResult};
pub use service::*;
