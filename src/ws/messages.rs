//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MatchId, Notice};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for commands, echoed in the reply; server-generated
    /// for notices.
    #[serde(default)]
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp. Clients may omit it.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Reply to the command with id `id`.
    #[must_use]
    pub fn response(id: String, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Response,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Error reply; `code` follows HTTP status semantics.
    #[must_use]
    pub fn error(id: String, code: u16, message: impl Into<String>) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Error,
            timestamp: Utc::now(),
            payload: serde_json::json!({
                "code": code,
                "message": message.into(),
            }),
        }
    }

    /// Wraps a notice for delivery to a subscriber.
    #[must_use]
    pub fn notice(notice: &Notice) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            msg_type: WsMessageType::Notice,
            timestamp: Utc::now(),
            payload: serde_json::to_value(notice).unwrap_or_default(),
        }
    }

    /// Serializes the envelope; `None` only if serialization fails.
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client reply to a command.
    Response,
    /// Server → Client change notice.
    Notice,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send in a `command` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Receive notices for the listed events. `"*"` means every event.
    Subscribe {
        /// Event ids or `"*"`.
        event_ids: Vec<String>,
    },
    /// Stop receiving notices for the listed events.
    Unsubscribe {
        /// Event ids.
        event_ids: Vec<String>,
    },
    /// Fetch the current state of one match.
    GetMatch {
        /// Target match.
        match_id: MatchId,
    },
}
