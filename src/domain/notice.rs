//! Change notices published after every successful mutation.
//!
//! Every notice names the event it belongs to so WebSocket clients can
//! subscribe per event. Clients treat a notice as a cue to re-read.
//! Fields only organizers may see are stripped by [`Notice::visible_to`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    ADMIN_ONLY, AccessDecision, AccessPolicy, AnnouncementId, EventId, JoinCode, MatchId,
    MatchStatus, ParticipantRole, User, UserId,
};

/// Change notice broadcast through the [`super::NoticeBus`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "notice_type", rename_all = "snake_case")]
pub enum Notice {
    /// A new event was created.
    EventCreated {
        /// Event identifier.
        event_id: EventId,
        /// Event title.
        title: String,
        /// Generated join code; absent in copies sent to non-organizers.
        #[serde(skip_serializing_if = "Option::is_none")]
        join_code: Option<JoinCode>,
        /// Creation time.
        timestamp: DateTime<Utc>,
    },

    /// A user asked to join an event.
    JoinRequested {
        /// Target event.
        event_id: EventId,
        /// Requesting user.
        user_id: UserId,
        /// Role asked for.
        requested_role: ParticipantRole,
        /// Request time.
        timestamp: DateTime<Utc>,
    },

    /// A match was added to an event.
    MatchCreated {
        /// Owning event.
        event_id: EventId,
        /// New match.
        match_id: MatchId,
        /// Match title.
        title: String,
        /// Creation time.
        timestamp: DateTime<Utc>,
    },

    /// A match moved to another status.
    MatchStatusChanged {
        /// Owning event.
        event_id: EventId,
        /// Affected match.
        match_id: MatchId,
        /// Status before the change.
        from: MatchStatus,
        /// Status after the change.
        to: MatchStatus,
        /// Team A's score after the change.
        score_a: Option<u32>,
        /// Team B's score after the change.
        score_b: Option<u32>,
        /// Change time.
        timestamp: DateTime<Utc>,
    },

    /// An announcement was posted to an event.
    AnnouncementPosted {
        /// Target event.
        event_id: EventId,
        /// New announcement.
        announcement_id: AnnouncementId,
        /// Headline.
        title: String,
        /// Posting time.
        timestamp: DateTime<Utc>,
    },
}

impl Notice {
    /// Returns the event this notice belongs to.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::JoinRequested { event_id, .. }
            | Self::MatchCreated { event_id, .. }
            | Self::MatchStatusChanged { event_id, .. }
            | Self::AnnouncementPosted { event_id, .. } => *event_id,
        }
    }

    /// Copy of the notice as `viewer` may see it.
    ///
    /// Join codes are kept only for roles admitted to admin routes.
    #[must_use]
    pub fn visible_to(&self, viewer: &User) -> Self {
        let organizer = AccessPolicy::decide(Some(viewer), ADMIN_ONLY) == AccessDecision::Allow;
        match self {
            Self::EventCreated {
                event_id,
                title,
                join_code,
                timestamp,
            } if !organizer => Self::EventCreated {
                event_id: *event_id,
                title: title.clone(),
                join_code: None,
                timestamp: *timestamp,
            },
            other => other.clone(),
        }
    }

    /// Returns the notice type as a static string slice.
    #[must_use]
    pub const fn notice_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::JoinRequested { .. } => "join_requested",
            Self::MatchCreated { .. } => "match_created",
            Self::MatchStatusChanged { .. } => "match_status_changed",
            Self::AnnouncementPosted { .. } => "announcement_posted",
        }
    }
}
