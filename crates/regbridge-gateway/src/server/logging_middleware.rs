//! HTTP Request/Response Logging Middleware
//!
//! One entry line and one exit line per request, correlated by trace ID.
//! Bodies and a few headers are logged at DEBUG.

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{debug, warn, Instrument};

use crate::logging::{RequestSpan, TraceContext};

/// Maximum body size to log (64KB)
const MAX_BODY_LOG_SIZE: usize = 64 * 1024;

/// Largest request body buffered before the handler runs (axum's default)
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Response bodies at or above this size are not logged
const MAX_RESPONSE_LOG_SIZE: usize = 1000;

/// Paths whose bodies are redacted (configs may carry API keys)
const SENSITIVE_PATHS: &[&str] = &["/create-websocket-url"];

/// Headers that should be redacted
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie", "x-api-key"];

/// Check if a path carries sensitive data
pub fn is_sensitive_path(path: &str) -> bool {
    SENSITIVE_PATHS.iter().any(|p| path.starts_with(p))
}

/// Compact header summary for DEBUG logs, secrets redacted
fn redact_headers_compact(headers: &axum::http::HeaderMap) -> String {
    headers
        .iter()
        .filter(|(name, _)| {
            matches!(
                name.as_str(),
                "content-type" | "accept" | "user-agent" | "authorization"
            )
        })
        .map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                format!("{}=[REDACTED]", name)
            } else {
                format!("{}={:?}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format bytes as string - compact version
pub fn format_body(bytes: &[u8], redact: bool) -> String {
    if redact {
        return "[REDACTED]".to_string();
    }

    if bytes.is_empty() {
        return "[empty]".to_string();
    }

    if bytes.len() > MAX_BODY_LOG_SIZE {
        return format!("[{} bytes]", bytes.len());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
                return serde_json::to_string(&json).unwrap_or_else(|_| text.to_string());
            }
            if text.chars().count() > 200 {
                let truncated: String = text.chars().take(200).collect();
                format!("{}...", truncated)
            } else {
                text.to_string()
            }
        }
        Err(_) => format!("[binary: {} bytes]", bytes.len()),
    }
}

/// Logging middleware for requests and responses
///
/// Generates a trace_id, stores the [`TraceContext`] in request extensions
/// and runs the rest of the stack inside the request span. Request bodies
/// larger than [`MAX_REQUEST_BODY_SIZE`] are rejected with 413 without being
/// buffered in full.
pub async fn http_logging_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let is_sensitive = is_sensitive_path(&path);

    let ctx = TraceContext::new(&method, &path);
    let span = RequestSpan::enter(&ctx);

    async move {
        RequestSpan::log_entry(&ctx);

        debug!(
            trace_id = %ctx.trace_id,
            headers = %redact_headers_compact(request.headers()),
            "Request headers"
        );

        let (mut parts, body) = request.into_parts();
        parts.extensions.insert(ctx.clone());

        let body_bytes = match Limited::new(body, MAX_REQUEST_BODY_SIZE).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
                warn!(
                    trace_id = %ctx.trace_id,
                    "Request body exceeds {} bytes", MAX_REQUEST_BODY_SIZE
                );
                RequestSpan::log_exit(&ctx, StatusCode::PAYLOAD_TOO_LARGE.as_u16());
                return Err(StatusCode::PAYLOAD_TOO_LARGE);
            }
            Err(e) => {
                warn!(trace_id = %ctx.trace_id, "Failed to read request body: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        };

        if !body_bytes.is_empty() {
            debug!(
                trace_id = %ctx.trace_id,
                body = %format_body(&body_bytes, is_sensitive),
                "Request body"
            );
        }

        let request = Request::from_parts(parts, Body::from(body_bytes));
        let response = next.run(request).await;

        let (parts, body) = response.into_parts();
        let status = parts.status;

        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(trace_id = %ctx.trace_id, "Failed to read response body: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        if !body_bytes.is_empty() && body_bytes.len() < MAX_RESPONSE_LOG_SIZE {
            debug!(
                trace_id = %ctx.trace_id,
                body = %format_body(&body_bytes, is_sensitive && status.is_success()),
                "Response body"
            );
        }

        RequestSpan::log_exit(&ctx, status.as_u16());

        Ok(Response::from_parts(parts, Body::from(body_bytes)))
    }
    .instrument(span)
    .await
}
