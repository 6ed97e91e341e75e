//! REST endpoint handlers organized by resource.

pub mod announcements;
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod matches;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(events::routes())
        .merge(matches::routes())
        .merge(announcements::routes())
        .merge(dashboard::routes())
}
