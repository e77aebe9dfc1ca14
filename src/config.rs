//! # Configuration
//!
//! Runtime settings loaded from environment variables.
//!
//! All settings have sensible defaults; command-line flags cover the query
//! itself and are handled by [`crate::cli`].

use crate::constants::{DEFAULT_CHECK_API_ACCESS, DEFAULT_REQUEST_TIMEOUT_SECS};
use std::time::Duration;

/// Settings that shape how the plugin talks to the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoCanConfig {
    /// Read timeout applied to every Kubernetes API request (seconds)
    pub request_timeout_secs: u64,
    /// Whether to run the self-access-review pass that warns about
    /// RBAC objects the caller cannot list
    pub check_api_access: bool,
}

impl Default for WhoCanConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            check_api_access: DEFAULT_CHECK_API_ACCESS,
        }
    }
}

impl WhoCanConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            request_timeout_secs: env_var_or_default(
                "WHO_CAN_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            check_api_access: env_var_or_default(
                "WHO_CAN_CHECK_API_ACCESS",
                DEFAULT_CHECK_API_ACCESS,
            ),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
