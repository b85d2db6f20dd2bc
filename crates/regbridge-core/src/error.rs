//! Error taxonomy for every registry-facing operation.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by registry operations.
///
/// None of these are retried or masked; the gateway maps each variant to an
/// HTTP status and hands the message to the caller.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Missing or malformed credential. Raised before any network I/O.
    #[error("{0}")]
    Unauthorized(String),

    /// The registry answered with a non-success status.
    #[error("Registry API error: {body}")]
    Upstream {
        /// Status code returned by the registry
        status: u16,
        /// Raw response body, verbatim
        body: String,
    },

    /// The registry did not answer within the configured timeout.
    #[error("Registry API timed out after {timeout:?}")]
    GatewayTimeout { timeout: Duration },

    /// The outbound call failed to complete (connect, TLS, body read).
    #[error("Registry API unreachable: {0}")]
    Network(String),

    /// A success response whose body does not match the expected schema.
    #[error("Invalid response from registry API: {0}")]
    InvalidUpstreamResponse(String),

    /// Local validation failure (unserializable config, malformed request).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected local fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// Upstream status code, when the registry produced one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
