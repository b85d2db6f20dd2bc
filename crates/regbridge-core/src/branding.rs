//! Centralized branding constants
//!
//! Product naming and deployment defaults come from this module.
//! Generated from branding.toml at build time.
//!
//! # Usage
//!
//! ```rust
//! use regbridge_core::branding;
//!
//! println!("App: {}", branding::DISPLAY_NAME);
//!
//! let var = branding::env_var("PORT"); // "REGBRIDGE_PORT"
//! ```

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/branding_generated.rs"));

/// Name of an environment override variable
///
/// # Example
/// ```ignore
/// let var = branding::env_var("TIMEOUT_SECS");
/// // Returns: "REGBRIDGE_TIMEOUT_SECS"
/// ```
pub fn env_var(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

/// User agent sent on every outbound registry call
pub fn user_agent() -> String {
    format!("{}/{}", DISPLAY_NAME, env!("CARGO_PKG_VERSION"))
}
