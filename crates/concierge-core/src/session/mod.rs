//! Chat session state machine.
//!
//! `transition` holds the pure state changes; `chat` wraps them in a
//! [`ChatSession`] that talks to a [`ConciergeService`](crate::service::ConciergeService)
//! and publishes every change on an event bus.

pub mod chat;
pub mod transition;

pub use chat::{ChatSession, SendOutcome, SessionOptions};
pub use transition::OutgoingMessage;
