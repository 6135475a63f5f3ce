//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.concierge/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies command-line overrides.

use std::path::{Path, PathBuf};

use concierge_types::config::ClientConfig;

/// Values given on the command line (or their env fallbacks).
///
/// `None` keeps whatever the config file says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub tenant_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(tenant_id) = self.tenant_id {
            // An empty id on the command line selects the single-tenant backend.
            config.tenant_id = Some(tenant_id).filter(|id| !id.trim().is_empty());
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        config
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CONCIERGE_DATA_DIR` environment variable
/// 2. `~/.concierge`
/// 3. `.concierge` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CONCIERGE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".concierge");
    }

    PathBuf::from(".concierge")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ClientConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            config_path(tmp.path()),
            r#"
base_url = "https://concierge.example.com"
tenant_id = "acme"
greeting = "Welcome back!"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.base_url, "https://concierge.example.com");
        assert_eq!(config.tenant_id.as_deref(), Some("acme"));
        assert_eq!(config.greeting, "Welcome back!");
        assert_eq!(config.fallback_tenant_name, "Hotel");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "base_url = [not valid")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let base = ClientConfig {
            tenant_id: Some("acme".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            base_url: Some("http://localhost:8080".to_string()),
            ..Default::default()
        };

        let config = overrides.apply(base);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.tenant_id.as_deref(), Some("acme"));
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn empty_tenant_override_selects_single_tenant() {
        let base = ClientConfig {
            tenant_id: Some("acme".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            tenant_id: Some(String::new()),
            ..Default::default()
        };
        assert!(overrides.apply(base).tenant_id.is_none());
    }
}
