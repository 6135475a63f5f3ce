//! Client configuration types.
//!
//! `ClientConfig` represents the `config.toml` in the data directory that
//! points the client at a concierge backend and tunes its wording.

use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_GREETING, DEFAULT_TENANT_NAME};

/// Top-level configuration for the concierge client.
///
/// Loaded from `~/.concierge/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the concierge backend (no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tenant to address. `None` talks to a single-tenant backend.
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// First message shown after login.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Name shown while the tenant lookup is unresolved or failed.
    #[serde(default = "default_fallback_tenant_name")]
    pub fallback_tenant_name: String,

    /// Transport timeout for each backend request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_fallback_tenant_name() -> String {
    DEFAULT_TENANT_NAME.to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tenant_id: None,
            greeting: default_greeting(),
            fallback_tenant_name: default_fallback_tenant_name(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
