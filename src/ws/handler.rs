//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::connection::run_connection;
use crate::api::extract::Caller;
use crate::app_state::AppState;
use crate::domain::{RouteGuard, SessionToken, require_user};
use crate::error::KeeperError;

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct WsAuthQuery {
    /// Session token for clients that cannot set an `Authorization` header.
    #[serde(default)]
    pub token: Option<String>,
}

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// The session comes from `Authorization: Bearer <token>` or, failing that,
/// from `?token=<token>`. The notice receiver is created before the upgrade
/// completes so no notice published after the handshake is missed.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without an open session.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<WsAuthQuery>,
) -> Result<impl IntoResponse, KeeperError> {
    let from_query = match query.token.as_deref().map(str::parse::<SessionToken>) {
        Some(Ok(token)) if caller.user.is_none() => state.identity.current_user(token).await,
        _ => None,
    };
    let viewer = require_user(caller.user().or(from_query.as_ref()), RouteGuard::Authenticated)
        .inspect_err(|_| tracing::warn!("ws upgrade without a session"))?
        .clone();

    let notice_rx = state.notice_bus.subscribe();
    let matches = Arc::clone(&state.matches);
    tracing::debug!(user_id = %viewer.id, "ws upgrade");

    Ok(ws.on_upgrade(move |socket| run_connection(socket, notice_rx, matches, viewer)))
}
