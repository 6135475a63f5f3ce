//! CLI command definitions and dispatch for the `concierge` binary.
//!
//! Uses clap derive macros for argument parsing. Connection settings are
//! global so every command talks to the same backend.

pub mod chat;
pub mod config;
pub mod tenant;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use concierge_infra::config::ConfigOverrides;

/// Chat with your hotel's concierge from the terminal.
#[derive(Parser)]
#[command(name = "concierge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend connection settings; each overrides `config.toml`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Concierge backend URL.
    #[arg(long, global = true, env = "CONCIERGE_BASE_URL")]
    pub base_url: Option<String>,

    /// Tenant identifier (empty for a single-tenant backend).
    #[arg(long, global = true, env = "CONCIERGE_TENANT_ID")]
    pub tenant: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "CONCIERGE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl From<ConnectionArgs> for ConfigOverrides {
    fn from(args: ConnectionArgs) -> Self {
        ConfigOverrides {
            base_url: args.base_url,
            tenant_id: args.tenant,
            request_timeout_secs: args.timeout_secs,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and start an interactive chat with the concierge.
    Chat {
        /// Room number (prompted if omitted).
        #[arg(long)]
        room: Option<String>,

        /// Guest name (prompted if omitted).
        #[arg(long)]
        name: Option<String>,
    },

    /// Look up a tenant's display name.
    Tenant {
        /// Tenant identifier (defaults to the configured tenant).
        id: Option<String>,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_with_credentials() {
        let cli = Cli::try_parse_from([
            "concierge",
            "chat",
            "--room",
            "412",
            "--name",
            "Okafor",
            "--base-url",
            "http://localhost:5000",
        ])
        .unwrap();

        let Commands::Chat { room, name } = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(room.as_deref(), Some("412"));
        assert_eq!(name.as_deref(), Some("Okafor"));
        assert_eq!(
            cli.connection.base_url.as_deref(),
            Some("http://localhost:5000")
        );
    }

    #[test]
    fn test_parse_tenant_with_verbosity() {
        let cli = Cli::try_parse_from(["concierge", "-vv", "tenant", "acme", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Tenant { id: Some(ref id) } if id == "acme"));
    }

    #[test]
    fn test_connection_args_become_overrides() {
        let overrides: ConfigOverrides = ConnectionArgs {
            base_url: None,
            tenant: Some("acme".to_string()),
            timeout_secs: Some(15),
        }
        .into();
        assert_eq!(overrides.tenant_id.as_deref(), Some("acme"));
        assert_eq!(overrides.request_timeout_secs, Some(15));
        assert!(overrides.base_url.is_none());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
