//! Connection URL builder
//!
//! Embeds a server configuration into a websocket URL:
//! `https://<host>/<qualifiedName>/ws?config=<base64(compact JSON)>`.
//! Purely local; no authentication and no network.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::error::{RegistryError, RegistryResult};

/// Build the connection URL for `qualified_name` with `config` embedded.
///
/// The config is serialized as compact JSON with keys in insertion order and
/// encoded as padded standard base64, so equal inputs give byte-identical
/// URLs. Numbers keep the exact text they were parsed from.
pub fn build_connection_url<T>(
    connection_host: &str,
    qualified_name: &str,
    config: &T,
) -> RegistryResult<String>
where
    T: Serialize + ?Sized,
{
    let encoded = encode_config(config)?;
    Ok(format!(
        "https://{}/{}/ws?config={}",
        connection_host, qualified_name, encoded
    ))
}

/// Serialize `config` to compact JSON and base64-encode it.
pub fn encode_config<T>(config: &T) -> RegistryResult<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(config).map_err(|e| {
        RegistryError::InvalidInput(format!("config cannot be serialized as JSON: {}", e))
    })?;
    Ok(STANDARD.encode(json))
}

/// Decode a `config=` value back into JSON.
pub fn decode_config(encoded: &str) -> RegistryResult<serde_json::Value> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| RegistryError::InvalidInput(format!("config is not valid base64: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RegistryError::InvalidInput(format!("config is not valid JSON: {}", e)))
}
