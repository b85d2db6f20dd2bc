//! Mapping from registry errors to HTTP responses.
//!
//! Every failure leaves the gateway as `{"detail": "<message>"}` with a
//! status code. Upstream failures keep the registry's own status.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use regbridge_core::RegistryError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Error returned by gateway handlers and extractors.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct GatewayError(#[from] pub RegistryError);

/// JSON error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub detail: String,
}

impl GatewayError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RegistryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RegistryError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RegistryError::GatewayTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RegistryError::Network(_) | RegistryError::InvalidUpstreamResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            RegistryError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RegistryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("[Gateway] {} {}", status.as_u16(), self.0);
        }
        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        Self(RegistryError::InvalidInput(rejection.body_text()))
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self(RegistryError::InvalidInput(rejection.body_text()))
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self(RegistryError::InvalidInput(rejection.body_text()))
    }
}
