//! Chat message type.
//!
//! A conversation is an append-only `Vec<Message>`; position is the only
//! identity a message has.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat bubble, authored either by the guest or by the concierge side.
///
/// Error notices produced when the backend cannot be reached are also
/// non-user messages: they render exactly like a concierge reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub is_user: bool,
    /// When the message was appended locally. Display only.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// A message typed by the guest.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            sent_at: Utc::now(),
        }
    }

    /// A message authored by the concierge side (greeting, reply or error notice).
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            sent_at: Utc::now(),
        }
    }
}
