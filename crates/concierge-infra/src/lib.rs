//! Infrastructure layer for the concierge client.
//!
//! Contains the HTTP implementation of the `ConciergeService` port defined in
//! `concierge-core`, plus configuration file loading and data directory
//! resolution.

pub mod config;
pub mod http;

pub use http::HttpConciergeService;
