//! Client authentication for the gateway
//!
//! The gateway issues no credentials of its own. It only checks that the
//! caller sent `Authorization: Bearer <token>` and hands the token on to the
//! registry.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use regbridge_core::BearerToken;
use tracing::debug;

use crate::error::GatewayError;

/// Bearer credential extractor
///
/// Rejects the request with 401 before the handler runs, so a malformed
/// credential never causes outbound traffic.
#[derive(Debug, Clone)]
pub struct RegistryAuth(pub BearerToken);

impl<S> FromRequestParts<S> for RegistryAuth
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Non-ASCII header values are treated like a malformed header
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap_or_default());

        match BearerToken::from_header(header) {
            Ok(token) => Ok(RegistryAuth(token)),
            Err(e) => {
                debug!("Rejected credential: {}", e);
                Err(e.into())
            }
        }
    }
}
