//! Chat session states.
//!
//! A session starts `Unauthenticated` with editable credential drafts and
//! moves one way to `Active` once the guest submits both fields. There is no
//! terminal state; the session lives until the process exits.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;

/// Display name used until (or instead of) a successful tenant lookup.
pub const DEFAULT_TENANT_NAME: &str = "Hotel";

/// First message of every conversation unless configured otherwise.
pub const DEFAULT_GREETING: &str = "Hello! What can I help you with today?";

/// Credential drafts captured by the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginDraft {
    pub room_number: String,
    pub guest_name: String,
}

impl LoginDraft {
    /// Both fields are present (whitespace does not count).
    pub fn is_complete(&self) -> bool {
        !self.room_number.trim().is_empty() && !self.guest_name.trim().is_empty()
    }
}

/// Conversation state after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    /// Stored for display; never sent to the backend.
    pub room_number: String,
    pub guest_name: String,
    /// Oldest first.
    pub messages: Vec<Message>,
    pub draft_text: String,
    /// A chat request is in flight.
    pub pending: bool,
}

/// The two phases of a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionState {
    Unauthenticated(LoginDraft),
    Active(ActiveSession),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn is_pending(&self) -> bool {
        match self {
            SessionState::Active(active) => active.pending,
            SessionState::Unauthenticated(_) => false,
        }
    }

    /// Messages so far (empty before login).
    pub fn messages(&self) -> &[Message] {
        match self {
            SessionState::Active(active) => &active.messages,
            SessionState::Unauthenticated(_) => &[],
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Unauthenticated(LoginDraft::default())
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Unauthenticated(_) => write!(f, "unauthenticated"),
            SessionState::Active(a) if a.pending => write!(f, "awaiting-reply"),
            SessionState::Active(_) => write!(f, "active"),
        }
    }
}

/// Which tenant the session talks to and how it is called.
///
/// Kept beside the phase because the tenant lookup may finish before or
/// after login, and must never hold up either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// `None` in the single-tenant deployment.
    pub tenant_id: Option<String>,
    pub tenant_name: String,
}

impl TenantContext {
    pub fn new(tenant_id: Option<String>, fallback_name: impl Into<String>) -> Self {
        Self {
            tenant_id,
            tenant_name: fallback_name.into(),
        }
    }
}

/// Point-in-time copy of everything an observer needs to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub tenant: TenantContext,
    pub state: SessionState,
}
