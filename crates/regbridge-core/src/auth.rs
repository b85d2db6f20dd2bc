//! Credential gate
//!
//! Validates the shape of an inbound `Authorization` header. Nothing here
//! touches the network; a rejected credential never reaches the registry.

use std::fmt;

use crate::error::{RegistryError, RegistryResult};

/// Scheme prefix required on the Authorization header (includes the space)
pub const BEARER_PREFIX: &str = "Bearer ";

/// A caller-supplied bearer token, forwarded unmodified to the registry.
///
/// Lives only as long as the request it authorizes.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Validate a raw header value.
    ///
    /// `None` means the header was absent. The value must start with
    /// `"Bearer "` and leave a non-empty token once the prefix is stripped.
    pub fn from_header(header: Option<&str>) -> RegistryResult<Self> {
        let header = header.ok_or_else(|| {
            RegistryError::Unauthorized("Missing authorization header".to_string())
        })?;

        let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
            RegistryError::Unauthorized("Invalid authorization header format".to_string())
        })?;

        if token.is_empty() {
            return Err(RegistryError::Unauthorized("No token provided".to_string()));
        }

        Ok(Self(token.to_string()))
    }

    /// The raw token without the scheme prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an outbound Authorization header
    pub fn header_value(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}
