//! Request logging infrastructure
//!
//! Trace IDs for request correlation plus one entry and one exit line per
//! request.

mod trace_context;

pub use trace_context::{generate_trace_id, RequestSpan, TraceContext};
