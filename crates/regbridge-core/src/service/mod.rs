//! Domain services

mod connection_url;
mod registry_api_client;

pub use connection_url::{build_connection_url, decode_config, encode_config};
pub use registry_api_client::{ListServersQuery, RegistryApiClient};
