//! Events published by a chat session as its state changes.
//!
//! Rendering layers subscribe to these instead of polling the session. Each
//! event describes a change that has already been applied.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A state change in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The guest logged in; the conversation now holds the greeting.
    Authenticated { guest_name: String },

    /// A message was appended at `index` (0-based).
    MessageAppended { index: usize, message: Message },

    /// The in-flight flag flipped.
    PendingChanged { pending: bool },

    /// The tenant display name changed (lookup resolved, or fell back).
    TenantNameChanged { tenant_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_tag() {
        let event = SessionEvent::PendingChanged { pending: true };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"pending_changed","pending":true}"#);
        let parsed: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
