//! WebSocket connection loop.
//!
//! Reads commands from the client and forwards notices for the events the
//! client follows.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::{SubscriptionManager, Targets};
use crate::domain::{Notice, User};
use crate::service::MatchService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// Notices are trimmed to what `viewer` may see before they are sent.
pub async fn run_connection(
    socket: WebSocket,
    mut notice_rx: broadcast::Receiver<Notice>,
    matches: Arc<MatchService>,
    viewer: User,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &matches).await;
                        if let Some(json) = reply.to_json()
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            notice = notice_rx.recv() => {
                match notice {
                    Ok(notice) => {
                        if !subs.matches(notice.event_id()) {
                            continue;
                        }
                        tracing::debug!(
                            notice = notice.notice_type_str(),
                            event_id = %notice.event_id(),
                            "ws forward"
                        );
                        let visible = notice.visible_to(&viewer);
                        let Some(json) = WsMessage::notice(&visible).to_json() else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind notice bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!(user_id = %viewer.id, "ws connection closed");
}

/// Handles one text frame and builds the reply.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    matches: &MatchService,
) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    match command {
        WsCommand::Subscribe { event_ids } => {
            let targets = Targets::parse(&event_ids);
            subs.subscribe(&targets.ids, targets.wildcard);
            tracing::debug!(
                count = subs.count(),
                wildcard = subs.is_subscribed_all(),
                "ws subscribe"
            );
            WsMessage::response(
                msg.id,
                serde_json::json!({
                    "subscribed": targets.ids,
                    "rejected": targets.rejected,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { event_ids } => {
            let targets = Targets::parse(&event_ids);
            subs.unsubscribe(&targets.ids, targets.wildcard);
            WsMessage::response(
                msg.id,
                serde_json::json!({
                    "unsubscribed": targets.ids,
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::GetMatch { match_id } => match matches.get_match(match_id).await {
            Ok(game) => WsMessage::response(
                msg.id,
                serde_json::to_value(&game).unwrap_or_default(),
            ),
            Err(e) => WsMessage::error(msg.id, e.status_code().as_u16(), e.to_string()),
        },
    }
}
