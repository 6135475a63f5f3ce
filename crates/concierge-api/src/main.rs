//! Concierge terminal client entry point.
//!
//! Binary name: `concierge`
//!
//! Parses CLI arguments, sets up tracing, resolves configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use concierge_observe::tracing_setup;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_setup::verbosity_directive(cli.verbose, cli.quiet);
    tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "concierge", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.connection.clone().into()).await?;

    let result = match cli.command {
        Commands::Chat { room, name } => cli::chat::loop_runner::run_chat_loop(&state, room, name).await,
        Commands::Tenant { id } => cli::tenant::show_tenant(&state, id, cli.json).await,
        Commands::Config => cli::config::show_config(&state, cli.json),
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    tracing_setup::shutdown_tracing();
    result
}
