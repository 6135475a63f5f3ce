//! Welcome banner display for chat sessions.

use console::style;
use tokio::sync::broadcast::{self, error::TryRecvError};

use concierge_types::event::SessionEvent;

/// Title shown above the login prompts, e.g. "Welcome to Hotel Chat".
pub fn welcome_title(tenant_name: &str) -> String {
    format!("Welcome to {tenant_name} Chat")
}

/// Print the welcome banner before login.
pub fn print_welcome_banner(tenant_name: &str, session_id: &str) {
    println!();
    println!("  {}", style(welcome_title(tenant_name)).cyan().bold());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
}

/// Drain events queued before login and return the tenant name to
/// re-announce, if the lookup settled on something other than `shown`.
pub fn resolved_tenant_name(
    shown: &str,
    events: &mut broadcast::Receiver<SessionEvent>,
) -> Option<String> {
    let mut latest = None;
    loop {
        match events.try_recv() {
            Ok(SessionEvent::TenantNameChanged { tenant_name }) => latest = Some(tenant_name),
            Ok(_) | Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    latest.filter(|name| name != shown)
}

/// Reprint the title once the tenant's display name is known.
pub fn print_welcome_title(tenant_name: &str) {
    println!();
    println!("  {}", style(welcome_title(tenant_name)).cyan().bold());
}

/// Print the hint line shown once the guest is logged in.
pub fn print_chat_hint(guest_name: &str, room_number: &str) {
    println!();
    println!(
        "  {} {} {}",
        style("Signed in as").dim(),
        style(guest_name).green().bold(),
        style(format!("(room {room_number})")).dim()
    );
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
