//! Matches and the match status state machine.
//!
//! ```text
//!   scheduled ──start──▶ ongoing ──complete──▶ completed
//!       │  ▲               │
//!  cancel  reschedule    cancel
//!       ▼  │               │
//!     cancelled ◀──────────┘
//! ```
//!
//! Nothing leaves `completed`. Scores are written only on the transition
//! into `completed`, which also stamps `end_time`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, MatchId, SportType};
use crate::error::KeeperError;

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not started.
    #[default]
    Scheduled,
    /// Being played.
    Ongoing,
    /// Finished; scores are final.
    Completed,
    /// Called off.
    Cancelled,
}

impl MatchStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::Ongoing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` if `next` is a permitted edge from `self`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Ongoing)
                | (Self::Ongoing, Self::Completed)
                | (Self::Scheduled | Self::Ongoing, Self::Cancelled)
                | (Self::Cancelled, Self::Scheduled)
        )
    }

    /// Statuses reachable from `self` in one step.
    #[must_use]
    pub const fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Scheduled => &[Self::Ongoing, Self::Cancelled],
            Self::Ongoing => &[Self::Completed, Self::Cancelled],
            Self::Cancelled => &[Self::Scheduled],
            Self::Completed => &[],
        }
    }

    /// Admin actions offered for a match in this status.
    #[must_use]
    pub const fn available_actions(self) -> &'static [MatchAction] {
        match self {
            Self::Scheduled => &[MatchAction::Start, MatchAction::Cancel],
            Self::Ongoing => &[MatchAction::Complete, MatchAction::Cancel],
            Self::Cancelled => &[MatchAction::Reschedule],
            Self::Completed => &[],
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(KeeperError::ValidationFailed(format!(
                "unknown match status: {other}"
            ))),
        }
    }
}

/// Named admin action on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    /// scheduled → ongoing
    Start,
    /// ongoing → completed
    Complete,
    /// scheduled | ongoing → cancelled
    Cancel,
    /// cancelled → scheduled
    Reschedule,
}

impl MatchAction {
    /// Status the action moves a match into.
    #[must_use]
    pub const fn target(self) -> MatchStatus {
        match self {
            Self::Start => MatchStatus::Ongoing,
            Self::Complete => MatchStatus::Completed,
            Self::Cancel => MatchStatus::Cancelled,
            Self::Reschedule => MatchStatus::Scheduled,
        }
    }
}

/// Scores submitted with a status change.
///
/// A side left as `None` keeps whatever score is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Scoreline {
    /// Team A's score.
    #[serde(default)]
    pub score_a: Option<u32>,
    /// Team B's score.
    #[serde(default)]
    pub score_b: Option<u32>,
}

/// A match between two teams, owned by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Match {
    /// Unique identifier.
    pub id: MatchId,
    /// Title.
    pub title: String,
    /// First team.
    pub team_a: String,
    /// Second team.
    pub team_b: String,
    /// First team's score, once recorded.
    pub score_a: Option<u32>,
    /// Second team's score, once recorded.
    pub score_b: Option<u32>,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// Set when the match is completed.
    pub end_time: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Owning event.
    pub event_id: EventId,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Sport played.
    pub sport: SportType,
}

impl Match {
    /// Moves the match to `next`, returning the previous status.
    ///
    /// Scores are applied only when `next` is [`MatchStatus::Completed`];
    /// `end_time` is stamped with `now` at the same moment.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidTransition`] if `next` is not reachable
    /// from the current status.
    pub fn transition(
        &mut self,
        next: MatchStatus,
        scores: Scoreline,
        now: DateTime<Utc>,
    ) -> Result<MatchStatus, KeeperError> {
        let previous = self.status;
        if !previous.can_transition_to(next) {
            return Err(KeeperError::InvalidTransition {
                from: previous,
                to: next,
            });
        }
        if next == MatchStatus::Completed {
            if let Some(a) = scores.score_a {
                self.score_a = Some(a);
            }
            if let Some(b) = scores.score_b {
                self.score_b = Some(b);
            }
            self.end_time = Some(now);
        }
        self.status = next;
        Ok(previous)
    }
}

/// Caller-supplied fields for a new match.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewMatch {
    /// Title (required).
    pub title: String,
    /// First team (required).
    pub team_a: String,
    /// Second team (required).
    pub team_b: String,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// `scheduled` (default) or `ongoing`.
    #[serde(default)]
    pub status: Option<MatchStatus>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Sport, the event's sport when omitted.
    #[serde(default)]
    pub sport: Option<SportType>,
}

impl NewMatch {
    /// Checks the required fields and the initial status.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] on blank fields or an
    /// initial status other than scheduled or ongoing.
    pub fn validate(&self) -> Result<(), KeeperError> {
        for (field, value) in [
            ("title", &self.title),
            ("team_a", &self.team_a),
            ("team_b", &self.team_b),
        ] {
            if value.trim().is_empty() {
                return Err(KeeperError::ValidationFailed(format!("{field} is required")));
            }
        }
        match self.status {
            None | Some(MatchStatus::Scheduled | MatchStatus::Ongoing) => Ok(()),
            Some(other) => Err(KeeperError::ValidationFailed(format!(
                "a new match cannot start as {other}"
            ))),
        }
    }

    /// Builds the stored match under `event_id`.
    #[must_use]
    pub fn into_match(self, event_id: EventId, event_sport: SportType) -> Match {
        Match {
            id: MatchId::new(),
            title: self.title.trim().to_string(),
            team_a: self.team_a.trim().to_string(),
            team_b: self.team_b.trim().to_string(),
            score_a: None,
            score_b: None,
            start_time: self.start_time,
            end_time: None,
            status: self.status.unwrap_or_default(),
            event_id,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            sport: self.sport.unwrap_or(event_sport),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};

    use super::*;

    pub(crate) fn new_match(title: &str, team_a: &str, team_b: &str) -> NewMatch {
        NewMatch {
            title: title.to_string(),
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            start_time: Utc::now(),
            status: None,
            notes: None,
            sport: None,
        }
    }

    pub(crate) fn scheduled(event_id: EventId, start_time: DateTime<Utc>) -> Match {
        let mut new = new_match("Final", "Lions", "Tigers");
        new.start_time = start_time;
        new.into_match(event_id, SportType::Basketball)
    }
}
