//! Build script that generates branding constants from branding.toml
//!
//! This reads the workspace-level branding.toml and generates Rust constants
//! that are included at compile time.

use std::env;
use std::fs;
use std::path::Path;

const DEFAULT_DISPLAY_NAME: &str = "RegBridge";
const DEFAULT_LOG_PREFIX: &str = "regbridge";
const DEFAULT_ENV_PREFIX: &str = "REGBRIDGE";
const DEFAULT_REGISTRY_URL: &str = "https://registry.smithery.ai";
const DEFAULT_CONNECTION_HOST: &str = "server.smithery.ai";
const DEFAULT_GATEWAY_PORT: u16 = 8000;

fn main() {
    // Re-run if branding.toml changes
    println!("cargo:rerun-if-changed=../../branding.toml");

    // Find branding.toml relative to this crate (2 levels up to workspace root)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    let branding_path = workspace_root.join("branding.toml");

    // Missing file means every key falls back to its default
    let content = fs::read_to_string(&branding_path).unwrap_or_default();

    // Simple TOML parsing without external dependency
    let display_name =
        extract_toml_string(&content, "display_name").unwrap_or(DEFAULT_DISPLAY_NAME);
    let log_prefix = extract_toml_string(&content, "log_prefix").unwrap_or(DEFAULT_LOG_PREFIX);
    let env_prefix = extract_toml_string(&content, "env_prefix").unwrap_or(DEFAULT_ENV_PREFIX);
    let registry_url =
        extract_toml_string(&content, "registry_url").unwrap_or(DEFAULT_REGISTRY_URL);
    let connection_host =
        extract_toml_string(&content, "connection_host").unwrap_or(DEFAULT_CONNECTION_HOST);
    let default_gateway_port = extract_toml_integer(&content, "default_gateway_port")
        .unwrap_or(DEFAULT_GATEWAY_PORT);

    let out_dir = env::var("OUT_DIR").unwrap();
    let rust_path = Path::new(&out_dir).join("branding_generated.rs");

    let rust_code = format!(
        r#"// Auto-generated branding constants from branding.toml
// DO NOT EDIT - regenerate with `cargo build`

/// User-facing display name
pub const DISPLAY_NAME: &str = {display_name:?};

/// Log file prefix
pub const LOG_PREFIX: &str = {log_prefix:?};

/// Prefix for environment variable overrides (e.g. REGBRIDGE_PORT)
pub const ENV_PREFIX: &str = {env_prefix:?};

/// Base URL of the upstream server registry
pub const REGISTRY_URL: &str = {registry_url:?};

/// Host that serves websocket connections to registry servers
pub const CONNECTION_HOST: &str = {connection_host:?};

/// Port the gateway listens on when none is configured
pub const DEFAULT_GATEWAY_PORT: u16 = {default_gateway_port};
"#,
    );

    fs::write(&rust_path, rust_code).expect("Failed to write branding_generated.rs");
}

/// Extract a string value from TOML content (simple parser, no dependencies)
fn extract_toml_string<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    let value = extract_raw_value(content, key)?;
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        return Some(&value[1..value.len() - 1]);
    }
    None
}

fn extract_toml_integer(content: &str, key: &str) -> Option<u16> {
    extract_raw_value(content, key)?.parse().ok()
}

fn extract_raw_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some((name, value)) = line.split_once('=') {
            if name.trim() == key {
                return Some(value.trim());
            }
        }
    }
    None
}
