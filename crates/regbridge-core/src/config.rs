//! Registry connection settings
//!
//! Defaults come from [`crate::branding`]; each field can be overridden
//! through a `REGBRIDGE_*` environment variable.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::branding;

/// Outbound timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

/// Where the registry lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL of the registry API, without trailing slash
    pub base_url: String,
    /// Host used by the connection URL builder
    pub connection_host: String,
    /// Per-call timeout for outbound requests
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: branding::REGISTRY_URL.to_string(),
            connection_host: branding::CONNECTION_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RegistryConfig {
    /// Defaults overridden by `REGBRIDGE_REGISTRY_URL`,
    /// `REGBRIDGE_CONNECTION_HOST` and `REGBRIDGE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(&branding::env_var("REGISTRY_URL")) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(host) = lookup(&branding::env_var("CONNECTION_HOST")) {
            config.connection_host = host;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: branding::env_var("TIMEOUT_SECS"),
                    value: secs.to_string(),
                    reason: "timeout must be at least one second".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the registry base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the outbound timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read `<ENV_PREFIX>_<suffix>` through `lookup` and parse it.
///
/// Absent variables yield `Ok(None)`; unparseable ones are an error.
pub fn parse_var<T, F>(lookup: &F, suffix: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let var = branding::env_var(suffix);
    match lookup(&var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            }),
    }
}
