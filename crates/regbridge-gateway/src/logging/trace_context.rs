//! Trace Context - Request correlation and structured logging
//!
//! Generates unique trace IDs and provides structured spans for request tracing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, info_span, warn, Span};

/// Global request counter for trace ID generation
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a short trace ID for this request
/// Format: 6 hex characters (e.g., "a1b2c3")
pub fn generate_trace_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);

    // Spread consecutive counters across the id space
    let mixed = timestamp ^ counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    format!("{:06x}", mixed & 0xFF_FFFF)
}

/// Trace context for a single request
#[derive(Debug, Clone)]
pub struct TraceContext {
    /// Trace ID (6 hex chars)
    pub trace_id: String,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path (e.g., /servers)
    pub path: String,
    /// Request start time
    pub started_at: Instant,
}

impl TraceContext {
    /// Create a new trace context for an incoming request
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            trace_id: generate_trace_id(),
            method: method.to_string(),
            path: path.to_string(),
            started_at: Instant::now(),
        }
    }

    /// Get elapsed time since request started
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

/// Request span builder for structured logging
pub struct RequestSpan;

impl RequestSpan {
    /// Create a tracing span for an incoming request
    ///
    /// All logs emitted inside the span (including the registry client's)
    /// carry the trace_id.
    pub fn enter(ctx: &TraceContext) -> Span {
        info_span!(
            "request",
            trace_id = %ctx.trace_id,
            method = %ctx.method,
            path = %ctx.path,
        )
    }

    /// Log request entry (single consolidated line)
    pub fn log_entry(ctx: &TraceContext) {
        info!(trace_id = %ctx.trace_id, "→ {} {}", ctx.method, ctx.path);
    }

    /// Log request completion (single consolidated line)
    ///
    /// Server-side failures are logged at WARN so upstream trouble stands out.
    pub fn log_exit(ctx: &TraceContext, status: u16) {
        let elapsed = ctx.elapsed_ms();
        if status >= 500 {
            warn!(trace_id = %ctx.trace_id, "← {} ({}ms)", status, elapsed);
        } else {
            info!(trace_id = %ctx.trace_id, "← {} ({}ms)", status, elapsed);
        }
    }
}
