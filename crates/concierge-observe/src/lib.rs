//! Observability setup for the concierge client.

pub mod tracing_setup;
