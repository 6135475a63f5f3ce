//! Chat session logic and the concierge service port.
//!
//! This crate defines the [`service::ConciergeService`] trait that the
//! infrastructure layer implements, the pure state transitions of a chat
//! session, and the [`session::ChatSession`] driver that sequences them
//! around backend calls. It depends only on `concierge-types` -- never on
//! `concierge-infra` or any HTTP crate.

pub mod event;
pub mod service;
pub mod session;
