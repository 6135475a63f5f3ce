//! Shared domain types for the hotel concierge chat client.
//!
//! This crate contains the types used across the workspace: chat messages,
//! the session state machine's states, observer events, the wire format of
//! the concierge backend, client configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod session;
pub mod wire;
