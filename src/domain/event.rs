//! Sports events, join requests and participants.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, JoinCode, JoinRequestId, ParticipantId, ParticipantRole, User, UserId};
use crate::error::{DuplicateJoin, KeeperError};

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Not started yet.
    #[default]
    Upcoming,
    /// In progress.
    Ongoing,
    /// Finished.
    Completed,
    /// Called off.
    Cancelled,
}

impl EventStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(KeeperError::ValidationFailed(format!(
                "unknown event status: {other}"
            ))),
        }
    }
}

/// Sport played at an event or match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SportType {
    /// Basketball.
    #[default]
    Basketball,
    /// American football.
    AmericanFootball,
    /// Association football.
    Football,
    /// Tennis.
    Tennis,
    /// Volleyball.
    Volleyball,
    /// Cricket.
    Cricket,
    /// Boxing.
    Boxing,
    /// Swimming.
    Swimming,
    /// Golf.
    Golf,
}

impl FromStr for SportType {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basketball" => Ok(Self::Basketball),
            "american-football" => Ok(Self::AmericanFootball),
            "football" => Ok(Self::Football),
            "tennis" => Ok(Self::Tennis),
            "volleyball" => Ok(Self::Volleyball),
            "cricket" => Ok(Self::Cricket),
            "boxing" => Ok(Self::Boxing),
            "swimming" => Ok(Self::Swimming),
            "golf" => Ok(Self::Golf),
            other => Err(KeeperError::ValidationFailed(format!("unknown sport: {other}"))),
        }
    }
}

/// Review state of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JoinRequestStatus {
    /// Waiting for the organizer.
    Pending,
    /// Accepted by the organizer.
    Approved,
    /// Turned down by the organizer.
    Rejected,
}

/// A user's request to take part in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JoinRequest {
    /// Request identifier.
    pub id: JoinRequestId,
    /// Requesting user.
    pub user_id: UserId,
    /// Requesting user's name at request time.
    pub user_name: String,
    /// Requesting user's email at request time.
    pub user_email: String,
    /// Target event.
    pub event_id: EventId,
    /// Role the user asked for.
    pub requested_role: ParticipantRole,
    /// Review state.
    pub status: JoinRequestStatus,
    /// When the request was made.
    pub requested_at: DateTime<Utc>,
}

impl JoinRequest {
    /// Creates a pending request from `user` for `event_id`, stamped now.
    #[must_use]
    pub fn pending(user: &User, event_id: EventId, requested_role: ParticipantRole) -> Self {
        Self {
            id: JoinRequestId::new(),
            user_id: user.id,
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            event_id,
            requested_role,
            status: JoinRequestStatus::Pending,
            requested_at: Utc::now(),
        }
    }
}

/// A user admitted to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventParticipant {
    /// Participant record identifier.
    pub id: ParticipantId,
    /// Admitted user.
    pub user_id: UserId,
    /// User's name.
    pub user_name: String,
    /// User's email.
    pub user_email: String,
    /// Event the user belongs to.
    pub event_id: EventId,
    /// Role within the event.
    pub role: ParticipantRole,
    /// Admission time.
    pub joined_at: DateTime<Utc>,
}

/// A sports event.
///
/// Announcements are not stored here; they live in the announcement store
/// and are joined by `event_id` when an event is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub venue: String,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Admin who created the event.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Code participants use to request access.
    pub join_code: JoinCode,
    /// Join requests in arrival order.
    pub pending_requests: Vec<JoinRequest>,
    /// Admitted participants.
    pub participants: Vec<EventParticipant>,
    /// Sport played.
    pub sport: SportType,
}

impl Event {
    /// Returns the request `user_id` already holds for this event, if any.
    #[must_use]
    pub fn request_of(&self, user_id: UserId) -> Option<&JoinRequest> {
        self.pending_requests.iter().find(|r| r.user_id == user_id)
    }

    /// Appends a pending request for `user` unless one already exists.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::DuplicateJoinRequest`] describing the status of
    /// the request the user already holds.
    pub fn add_join_request(
        &mut self,
        user: &User,
        requested_role: ParticipantRole,
    ) -> Result<JoinRequest, KeeperError> {
        if let Some(existing) = self.request_of(user.id) {
            let kind = match existing.status {
                JoinRequestStatus::Pending => DuplicateJoin::AlreadyPending,
                JoinRequestStatus::Approved => DuplicateJoin::AlreadyMember,
                JoinRequestStatus::Rejected => DuplicateJoin::PreviouslyRejected,
            };
            return Err(KeeperError::DuplicateJoinRequest(kind));
        }
        let request = JoinRequest::pending(user, self.id, requested_role);
        self.pending_requests.push(request.clone());
        Ok(request)
    }
}

/// Caller-supplied fields for a new event.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewEvent {
    /// Title (required).
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Venue (required).
    pub venue: String,
    /// Initial status, `upcoming` when omitted.
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// Sport, the configured default when omitted.
    #[serde(default)]
    pub sport: Option<SportType>,
}

impl NewEvent {
    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] if the title or venue is blank.
    pub fn validate(&self) -> Result<(), KeeperError> {
        if self.title.trim().is_empty() {
            return Err(KeeperError::ValidationFailed("title is required".to_string()));
        }
        if self.venue.trim().is_empty() {
            return Err(KeeperError::ValidationFailed("venue is required".to_string()));
        }
        Ok(())
    }

    /// Builds the stored event.
    #[must_use]
    pub fn into_event(
        self,
        created_by: UserId,
        join_code: JoinCode,
        default_sport: SportType,
    ) -> Event {
        Event {
            id: EventId::new(),
            title: self.title.trim().to_string(),
            description: self.description,
            date: self.date,
            venue: self.venue.trim().to_string(),
            status: self.status.unwrap_or_default(),
            created_by,
            created_at: Utc::now(),
            join_code,
            pending_requests: Vec::new(),
            participants: Vec::new(),
            sport: self.sport.unwrap_or(default_sport),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod fixtures {
    use chrono::Utc;

    use super::*;
    use crate::domain::{JoinCodeSource, RandomJoinCodes, Role};

    pub(crate) fn event(title: &str, status: EventStatus) -> Event {
        let code = RandomJoinCodes.draw();
        NewEvent {
            title: title.to_string(),
            description: format!("{title} description"),
            date: Utc::now(),
            venue: "Main Arena".to_string(),
            status: Some(status),
            sport: None,
        }
        .into_event(UserId::new(), code, SportType::Basketball)
    }

    pub(crate) fn admin() -> User {
        User::new("Ada Admin", "ada@example.com", Role::Admin)
    }

    pub(crate) fn player(name: &str) -> User {
        User::new(name, format!("{}@example.com", name.to_lowercase()), Role::Player)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::fixtures::{event, player};
    use super::*;

    #[test]
    fn first_join_request_is_pending() {
        let mut ev = event("Spring Cup", EventStatus::Upcoming);
        let user = player("Pat");
        let Ok(request) = ev.add_join_request(&user, ParticipantRole::Coach) else {
            panic!("first request succeeds");
        };
        assert_eq!(request.status, JoinRequestStatus::Pending);
        assert_eq!(request.requested_role, ParticipantRole::Coach);
        assert_eq!(request.event_id, ev.id);
        assert_eq!(ev.pending_requests.len(), 1);
    }

    #[test]
    fn second_request_reports_existing_status() {
        let cases = [
            (JoinRequestStatus::Pending, DuplicateJoin::AlreadyPending),
            (JoinRequestStatus::Approved, DuplicateJoin::AlreadyMember),
            (JoinRequestStatus::Rejected, DuplicateJoin::PreviouslyRejected),
        ];
        for (status, expected) in cases {
            let mut ev = event("League", EventStatus::Ongoing);
            let user = player("Sam");
            let mut existing = JoinRequest::pending(&user, ev.id, ParticipantRole::Player);
            existing.status = status;
            ev.pending_requests.push(existing);

            let result = ev.add_join_request(&user, ParticipantRole::Player);
            let Err(KeeperError::DuplicateJoinRequest(kind)) = result else {
                panic!("expected duplicate for {status:?}");
            };
            assert_eq!(kind, expected);
            assert_eq!(ev.pending_requests.len(), 1);
        }
    }

    #[test]
    fn new_event_requires_title_and_venue() {
        let mut new = NewEvent {
            title: "  ".to_string(),
            description: String::new(),
            date: Utc::now(),
            venue: "Court 1".to_string(),
            status: None,
            sport: None,
        };
        assert!(new.validate().is_err());
        new.title = "Open".to_string();
        new.venue = String::new();
        assert!(new.validate().is_err());
        new.venue = "Court 1".to_string();
        assert!(new.validate().is_ok());
    }

    #[test]
    fn into_event_applies_defaults() {
        let Ok(code) = JoinCode::parse("ABCD1234") else {
            panic!("valid code");
        };
        let creator = UserId::new();
        let ev = NewEvent {
            title: "Open".to_string(),
            description: String::new(),
            date: Utc::now(),
            venue: "Court 1".to_string(),
            status: None,
            sport: None,
        }
        .into_event(creator, code, SportType::Tennis);
        assert_eq!(ev.status, EventStatus::Upcoming);
        assert_eq!(ev.sport, SportType::Tennis);
        assert_eq!(ev.created_by, creator);
        assert!(ev.pending_requests.is_empty());
        assert!(ev.participants.is_empty());
    }

    #[test]
    fn sport_uses_kebab_case() {
        let Ok(json) = serde_json::to_string(&SportType::AmericanFootball) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"american-football\"");
        assert!(matches!(
            "american-football".parse::<SportType>(),
            Ok(SportType::AmericanFootball)
        ));
    }
}
