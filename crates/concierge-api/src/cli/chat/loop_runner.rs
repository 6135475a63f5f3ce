//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: background tenant lookup, login
//! prompts, the event-driven renderer, and the input loop that submits one
//! message at a time.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use concierge_core::session::SendOutcome;
use concierge_types::error::SessionError;

use crate::state::AppState;

use super::banner::{
    print_chat_hint, print_welcome_banner, print_welcome_title, resolved_tenant_name,
};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::login::collect_credentials;
use super::renderer::{run_event_printer, ChatRenderer};

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat: log in, then exchange messages until EOF or `/exit`.
pub async fn run_chat_loop(
    state: &AppState,
    room: Option<String>,
    name: Option<String>,
) -> anyhow::Result<()> {
    let session = Arc::new(state.new_session()?);

    // Subscribe first so neither the tenant name nor the greeting is missed.
    let mut events = session.subscribe();

    // The display name resolves in the background; login never waits on it.
    let lookup = tokio::spawn({
        let session = session.clone();
        async move { session.refresh_tenant_name().await }
    });

    let shown = session.tenant_name();
    print_welcome_banner(&shown, &session.id().to_string());

    let (room, name) = collect_credentials(room, name)?;
    if let Some(tenant_name) = resolved_tenant_name(&shown, &mut events) {
        print_welcome_title(&tenant_name);
    }
    session.set_room_number(&room)?;
    session.set_guest_name(&name)?;
    session.submit_login()?;
    info!(session_id = %session.id(), "Chat session started");

    print_chat_hint(&name, &room);

    let prompt = format!("  {} ", style(format!("{name} >")).green().bold());
    let (mut chat_input, mut writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let printer = tokio::spawn(run_event_printer(
        ChatRenderer::new(session.tenant_name(), name.clone()),
        events,
        writer.clone(),
    ));

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                let _ = writeln!(
                    writer,
                    "  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::History => {
                    let renderer = ChatRenderer::new(session.tenant_name(), name.clone());
                    let snapshot = session.snapshot();
                    let _ = writeln!(writer, "\n{}", renderer.format_history(snapshot.state.messages()));
                }
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => break,
                ChatCommand::Unknown(cmd_name) => {
                    let _ = writeln!(
                        writer,
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(cmd_name).dim()
                    );
                }
            }
            continue;
        }

        session.set_draft_text(&text)?;
        let spinner = thinking_spinner();
        let result = session.submit_draft().await;
        spinner.finish_and_clear();

        match result {
            Ok(SendOutcome::Replied { index }) => debug!(index, "Reply received"),
            Ok(SendOutcome::Failed { index, error }) => {
                debug!(index, kind = error.kind(), "Error notice shown to guest");
            }
            // Blank lines are simply ignored, like an empty input box.
            Err(SessionError::EmptyMessage) => {}
            Err(e) => {
                let _ = writeln!(writer, "  {} {e}", style("!").yellow().bold());
            }
        }
    }

    lookup.abort();
    printer.abort();
    chat_input.finish();
    println!("\n  {}", style("Session ended.").dim());
    Ok(())
}
