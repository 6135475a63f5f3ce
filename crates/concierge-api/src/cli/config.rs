//! Effective configuration display.

use anyhow::Result;
use console::style;

use concierge_infra::config::config_path;

use crate::state::AppState;

/// Print the configuration after file loading and CLI overrides.
pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&state.config)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style("Config file:").bold(),
        style(config_path(&state.data_dir).display()).dim()
    );
    println!();
    for line in toml::to_string_pretty(&state.config)?.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
