//! Event-driven transcript rendering.
//!
//! The renderer never reads session state on its own initiative: it reacts
//! to [`SessionEvent`]s from the session's event bus and writes formatted
//! lines through the readline `SharedWriter`, so output lands above the
//! prompt instead of inside whatever the guest is typing.

use std::io::Write;

use chrono::Local;
use console::style;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use concierge_types::event::SessionEvent;
use concierge_types::message::Message;

/// Formats messages for the terminal.
#[derive(Debug, Clone)]
pub struct ChatRenderer {
    /// Label for concierge-side messages.
    tenant_name: String,
    guest_name: String,
}

impl ChatRenderer {
    pub fn new(tenant_name: impl Into<String>, guest_name: impl Into<String>) -> Self {
        Self {
            tenant_name: tenant_name.into(),
            guest_name: guest_name.into(),
        }
    }

    pub fn set_tenant_name(&mut self, tenant_name: impl Into<String>) {
        self.tenant_name = tenant_name.into();
    }

    /// One styled line for a message.
    pub fn format_message(&self, message: &Message) -> String {
        let time = message.sent_at.with_timezone(&Local).format("%H:%M");
        if message.is_user {
            format!(
                "  {} {} {}",
                style(time).dim(),
                style(format!("{} >", self.guest_name)).green().bold(),
                message.text
            )
        } else {
            format!(
                "  {} {} {}",
                style(time).dim(),
                style(format!("{} >", self.tenant_name)).cyan().bold(),
                message.text
            )
        }
    }

    /// Text to print for an event, if any.
    ///
    /// Guest messages are not echoed live (the guest just typed them), and
    /// pending changes are shown by the spinner rather than the transcript.
    pub fn render_event(&mut self, event: &SessionEvent) -> Option<String> {
        match event {
            SessionEvent::MessageAppended { message, .. } if !message.is_user => {
                Some(format!("\n{}\n", self.format_message(message)))
            }
            SessionEvent::TenantNameChanged { tenant_name } => {
                self.set_tenant_name(tenant_name.clone());
                None
            }
            _ => None,
        }
    }

    /// Whole conversation, oldest first.
    pub fn format_history(&self, messages: &[Message]) -> String {
        let mut out = String::new();
        for message in messages {
            out.push_str(&self.format_message(message));
            out.push('\n');
        }
        out
    }
}

/// Print events until the session's bus closes.
pub async fn run_event_printer<W: Write>(
    mut renderer: ChatRenderer,
    mut events: broadcast::Receiver<SessionEvent>,
    mut out: W,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(text) = renderer.render_event(&event) {
                    let _ = writeln!(out, "{text}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Renderer lagged behind session events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    #[test]
    fn test_format_labels_by_author() {
        let renderer = ChatRenderer::new("Hotel", "Okafor");
        let user = plain(&renderer.format_message(&Message::user("Is the spa open?")));
        let reply = plain(&renderer.format_message(&Message::system("Until 9pm.")));
        assert!(user.contains("Okafor > Is the spa open?"));
        assert!(reply.contains("Hotel > Until 9pm."));
    }

    #[test]
    fn test_render_event_skips_user_and_pending() {
        let mut renderer = ChatRenderer::new("Hotel", "Okafor");
        assert!(renderer
            .render_event(&SessionEvent::MessageAppended {
                index: 1,
                message: Message::user("hi"),
            })
            .is_none());
        assert!(renderer
            .render_event(&SessionEvent::PendingChanged { pending: true })
            .is_none());
        let reply = renderer
            .render_event(&SessionEvent::MessageAppended {
                index: 2,
                message: Message::system("Server error: 500"),
            })
            .unwrap();
        assert!(plain(&reply).contains("Hotel > Server error: 500"));
    }

    #[test]
    fn test_tenant_name_change_relabels_replies() {
        let mut renderer = ChatRenderer::new("Hotel", "Okafor");
        renderer.render_event(&SessionEvent::TenantNameChanged {
            tenant_name: "Acme Resort".to_string(),
        });
        let line = plain(&renderer.format_message(&Message::system("Welcome")));
        assert!(line.contains("Acme Resort > Welcome"));
    }

    #[test]
    fn test_format_history_keeps_order() {
        let renderer = ChatRenderer::new("Hotel", "Okafor");
        let history = plain(&renderer.format_history(&[
            Message::system("Hello!"),
            Message::user("What time is checkout?"),
            Message::system("Checkout is at 11am."),
        ]));
        let first = history.find("Hello!").unwrap();
        let second = history.find("What time is checkout?").unwrap();
        let third = history.find("Checkout is at 11am.").unwrap();
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_event_printer_writes_replies() {
        let (tx, rx) = broadcast::channel(16);
        tx.send(SessionEvent::MessageAppended {
            index: 0,
            message: Message::system("Hello! What can I help you with today?"),
        })
        .unwrap();
        drop(tx);

        let mut out = Vec::new();
        run_event_printer(ChatRenderer::new("Hotel", "Okafor"), rx, &mut out).await;

        let text = plain(&String::from_utf8(out).unwrap());
        assert!(text.contains("Hotel > Hello! What can I help you with today?"));
    }
}
