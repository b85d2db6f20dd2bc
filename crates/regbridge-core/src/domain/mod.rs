//! Registry domain types
//!
//! Transient request/response shapes. Field names follow the registry's
//! camelCase wire format.

mod connection_url;
mod server;

pub use connection_url::{ConnectionUrlRequest, ConnectionUrlResponse};
pub use server::{
    Connection, ConnectionKind, Pagination, ServerDetailResponse, ServerListResponse,
    ServerSummary,
};
