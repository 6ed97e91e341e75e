//! # matchkeeper
//!
//! REST API and WebSocket service for sports events, matches, join codes
//! and announcements.
//!
//! All state lives in memory. Administrators create events and matches,
//! drive matches through their status lifecycle and post announcements;
//! any signed-in user can join an event with its 8-character join code.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── Identity / Event / Match / Announcement / Dashboard services (service/)
//!     ├── NoticeBus (domain/)
//!     │
//!     └── In-memory stores + AccessPolicy (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod seed;
pub mod service;
pub mod ws;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::KeeperConfig;

/// Builds the full HTTP application: REST routes, `/ws`, tracing, request
/// timeout and permissive CORS.
pub fn build_app(state: AppState, config: &KeeperConfig) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws::handler::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
