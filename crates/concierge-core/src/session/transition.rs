//! Pure state transitions of a chat session.
//!
//! None of these functions perform IO. A send is split in two halves:
//! [`begin_send`] applies everything that happens before the network call
//! and describes the request to make; [`complete_send`] applies its result.

use concierge_types::error::{ConciergeError, SessionError};
use concierge_types::message::Message;
use concierge_types::session::{ActiveSession, LoginDraft, SessionState};

/// A guest message accepted for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub guest_name: String,
    pub text: String,
    /// Position of the user message in the conversation.
    pub index: usize,
}

/// Overwrite the room number draft. Only valid before login.
pub fn set_room_number(state: &mut SessionState, room_number: &str) -> Result<(), SessionError> {
    match state {
        SessionState::Unauthenticated(draft) => {
            draft.room_number = room_number.to_string();
            Ok(())
        }
        SessionState::Active(_) => Err(SessionError::AlreadyAuthenticated),
    }
}

/// Overwrite the guest name draft. Only valid before login.
pub fn set_guest_name(state: &mut SessionState, guest_name: &str) -> Result<(), SessionError> {
    match state {
        SessionState::Unauthenticated(draft) => {
            draft.guest_name = guest_name.to_string();
            Ok(())
        }
        SessionState::Active(_) => Err(SessionError::AlreadyAuthenticated),
    }
}

/// Overwrite the message draft. Allowed while a reply is pending.
pub fn set_draft_text(state: &mut SessionState, text: &str) -> Result<(), SessionError> {
    match state {
        SessionState::Active(active) => {
            active.draft_text = text.to_string();
            Ok(())
        }
        SessionState::Unauthenticated(_) => Err(SessionError::NotAuthenticated),
    }
}

/// Log the guest in and seed the conversation with `greeting`.
///
/// Both fields must contain something other than whitespace. The stored
/// values are kept as typed.
pub fn authenticate(
    state: &mut SessionState,
    room_number: &str,
    guest_name: &str,
    greeting: &str,
) -> Result<(), SessionError> {
    if state.is_active() {
        return Err(SessionError::AlreadyAuthenticated);
    }
    let credentials = LoginDraft {
        room_number: room_number.to_string(),
        guest_name: guest_name.to_string(),
    };
    if !credentials.is_complete() {
        return Err(SessionError::MissingCredentials);
    }

    *state = SessionState::Active(ActiveSession {
        room_number: credentials.room_number,
        guest_name: credentials.guest_name,
        messages: vec![Message::system(greeting)],
        draft_text: String::new(),
        pending: false,
    });
    Ok(())
}

/// Accept `text` for delivery.
///
/// Appends the user message, clears the draft and raises `pending`, all
/// before any request exists. Rejections leave the state untouched; a busy
/// session rejects even blank text.
pub fn begin_send(state: &mut SessionState, text: &str) -> Result<OutgoingMessage, SessionError> {
    let SessionState::Active(active) = state else {
        return Err(SessionError::NotAuthenticated);
    };
    if active.pending {
        return Err(SessionError::Busy);
    }
    if text.trim().is_empty() {
        return Err(SessionError::EmptyMessage);
    }

    active.messages.push(Message::user(text));
    active.draft_text.clear();
    active.pending = true;

    Ok(OutgoingMessage {
        guest_name: active.guest_name.clone(),
        text: text.to_string(),
        index: active.messages.len() - 1,
    })
}

/// Apply the result of a chat request: append the reply or the error
/// notice, then drop `pending`.
///
/// Returns the index of the appended message.
pub fn complete_send(
    state: &mut SessionState,
    result: &Result<String, ConciergeError>,
) -> Result<usize, SessionError> {
    let SessionState::Active(active) = state else {
        return Err(SessionError::NotAuthenticated);
    };

    let text = match result {
        Ok(reply) => reply.clone(),
        Err(err) => err.bubble_text(),
    };
    active.messages.push(Message::system(text));
    active.pending = false;
    Ok(active.messages.len() - 1)
}
