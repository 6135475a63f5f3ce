//! Tenant lookup command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Resolve and print a tenant's display name.
///
/// Lookup failures are not errors: like the chat widget, the command falls
/// back to the configured default name and only logs the cause.
pub async fn show_tenant(state: &AppState, id: Option<String>, json: bool) -> Result<()> {
    let session = state.new_session()?;
    let tenant_id = id
        .or_else(|| state.config.tenant_id.clone())
        .filter(|id| !id.trim().is_empty());

    let tenant_name = match &tenant_id {
        Some(id) => session.fetch_tenant_display_name(id).await,
        None => session.tenant_name(),
    };

    if json {
        let out = serde_json::json!({
            "tenant_id": tenant_id,
            "tenant_name": tenant_name,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    match &tenant_id {
        Some(id) => println!(
            "  {} {} {}",
            style(&tenant_name).cyan().bold(),
            style("·").dim(),
            style(id).dim()
        ),
        None => println!(
            "  {} {}",
            style(&tenant_name).cyan().bold(),
            style("(single-tenant)").dim()
        ),
    }
    println!();
    Ok(())
}
