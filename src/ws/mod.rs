//! WebSocket layer: connection handling, commands and per-event
//! subscriptions.
//!
//! The endpoint at `/ws` streams [`crate::domain::Notice`]s for the events a
//! client subscribes to and answers `get_match` lookups.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
