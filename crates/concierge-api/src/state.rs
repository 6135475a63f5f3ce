//! Application state wiring configuration and the backend client together.

use std::path::PathBuf;

use concierge_core::session::{ChatSession, SessionOptions};
use concierge_infra::config::{load_config, resolve_data_dir, ConfigOverrides};
use concierge_infra::HttpConciergeService;
use concierge_types::config::ClientConfig;

/// A chat session pinned to the HTTP backend.
pub type ConcreteChatSession = ChatSession<HttpConciergeService>;

/// Resolved configuration shared by every command.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load `config.toml` from the data directory and apply CLI overrides.
    pub async fn init(overrides: ConfigOverrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = overrides.apply(load_config(&data_dir).await);
        tracing::debug!(base_url = %config.base_url, tenant_id = ?config.tenant_id, "Configuration loaded");
        Ok(Self { config, data_dir })
    }

    /// Build a fresh chat session against the configured backend.
    pub fn new_session(&self) -> anyhow::Result<ConcreteChatSession> {
        let service = HttpConciergeService::from_config(&self.config)?;
        Ok(ChatSession::new(service, SessionOptions::from(&self.config)))
    }
}
