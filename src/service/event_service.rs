//! Event creation, lookup and the join workflow.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    ADMIN_ONLY, AnnouncementStore, AnnouncementView, Event, EventFilter, EventId, EventStore,
    JoinCode, JoinCodeSource, JoinRequest, NewEvent, Notice, NoticeBus, ParticipantRole,
    RouteGuard, SportType, User, require_user,
};
use crate::error::KeeperError;

/// Result of a successful join request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JoinReceipt {
    /// Event the request targets.
    pub event_id: EventId,
    /// Title of that event.
    pub event_title: String,
    /// The stored request.
    pub request: JoinRequest,
    /// Confirmation to show the user.
    pub message: String,
}

/// An event together with its announcements, newest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDetail {
    /// The event.
    #[serde(flatten)]
    pub event: Event,
    /// Announcements posted to the event.
    pub announcements: Vec<AnnouncementView>,
}

/// Join-code settings for event creation.
#[derive(Debug, Clone)]
pub struct JoinCodePolicy {
    /// Where candidate codes come from.
    pub source: Arc<dyn JoinCodeSource>,
    /// Draws before giving up.
    pub max_attempts: u32,
}

/// Orchestrates event operations and emits notices.
#[derive(Debug, Clone)]
pub struct EventService {
    events: Arc<EventStore>,
    announcements: Arc<AnnouncementStore>,
    codes: JoinCodePolicy,
    default_sport: SportType,
    bus: NoticeBus,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(
        events: Arc<EventStore>,
        announcements: Arc<AnnouncementStore>,
        codes: JoinCodePolicy,
        default_sport: SportType,
        bus: NoticeBus,
    ) -> Self {
        Self {
            events,
            announcements,
            codes,
            default_sport,
            bus,
        }
    }

    /// Creates an event with a fresh join code.
    ///
    /// # Errors
    ///
    /// - [`KeeperError::Unauthenticated`] / [`KeeperError::Forbidden`] unless
    ///   `actor` is an admin.
    /// - [`KeeperError::ValidationFailed`] on a blank title or venue.
    /// - [`KeeperError::JoinCodeExhausted`] if no unused code was drawn.
    pub async fn create_event(
        &self,
        actor: Option<&User>,
        new: NewEvent,
    ) -> Result<Event, KeeperError> {
        let admin = require_user(actor, ADMIN_ONLY)?;
        new.validate()?;

        let created_by = admin.id;
        let default_sport = self.default_sport;
        let event = self
            .events
            .insert_with_code(self.codes.source.as_ref(), self.codes.max_attempts, |code| {
                new.into_event(created_by, code, default_sport)
            })
            .await?;

        let _ = self.bus.publish(Notice::EventCreated {
            event_id: event.id,
            title: event.title.clone(),
            join_code: Some(event.join_code.clone()),
            timestamp: event.created_at,
        });

        tracing::info!(
            event_id = %event.id,
            join_code = %event.join_code,
            created_by = %created_by,
            "event created"
        );
        Ok(event)
    }

    /// Events passing `filter`, in creation order.
    pub async fn list_events(&self, filter: &EventFilter) -> Vec<Event> {
        let mut events = self.events.list().await;
        events.retain(|e| filter.matches_event(e));
        events
    }

    /// Returns one event.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EventNotFound`] for an unknown id.
    pub async fn event(&self, id: EventId) -> Result<Event, KeeperError> {
        self.events.snapshot(id).await
    }

    /// Returns one event with its announcements joined in.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EventNotFound`] for an unknown id.
    pub async fn event_detail(&self, id: EventId) -> Result<EventDetail, KeeperError> {
        let event = self.events.snapshot(id).await?;
        let announcements = self
            .announcements
            .list_by_event(id)
            .await
            .into_iter()
            .map(|announcement| AnnouncementView {
                announcement,
                event_title: event.title.clone(),
            })
            .collect();
        Ok(EventDetail {
            event,
            announcements,
        })
    }

    /// Finds the event that owns a join code, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] for malformed input and
    /// [`KeeperError::JoinCodeNotFound`] when no event uses the code.
    pub async fn event_by_join_code(&self, raw: &str) -> Result<Event, KeeperError> {
        let code = JoinCode::parse(raw)?;
        let Some(lock) = self.events.find_by_code(&code).await else {
            return Err(KeeperError::JoinCodeNotFound(code.to_string()));
        };
        let event = lock.read().await;
        Ok(event.clone())
    }

    /// Files a pending join request for `actor` on the event owning `raw`.
    ///
    /// The duplicate check and the append run under the event's write lock,
    /// so concurrent requests by one user yield exactly one stored request.
    ///
    /// # Errors
    ///
    /// - [`KeeperError::Unauthenticated`] without a signed-in user.
    /// - [`KeeperError::ValidationFailed`] / [`KeeperError::JoinCodeNotFound`]
    ///   for a bad code.
    /// - [`KeeperError::DuplicateJoinRequest`] if the user already holds a
    ///   request for the event.
    pub async fn request_to_join(
        &self,
        actor: Option<&User>,
        raw: &str,
        requested_role: ParticipantRole,
    ) -> Result<JoinReceipt, KeeperError> {
        let user = require_user(actor, RouteGuard::Authenticated)?;
        let code = JoinCode::parse(raw)?;
        let Some(lock) = self.events.find_by_code(&code).await else {
            tracing::debug!(join_code = %code, "join with unknown code");
            return Err(KeeperError::JoinCodeNotFound(code.to_string()));
        };

        let (event_id, event_title, request) = {
            let mut event = lock.write().await;
            let request = event.add_join_request(user, requested_role)?;
            (event.id, event.title.clone(), request)
        };

        let _ = self.bus.publish(Notice::JoinRequested {
            event_id,
            user_id: user.id,
            requested_role,
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, user_id = %user.id, role = %requested_role, "join requested");
        Ok(JoinReceipt {
            message: format!(
                "Join request sent for \"{event_title}\" as {requested_role}. Please wait for approval from the event organizer."
            ),
            event_id,
            event_title,
            request,
        })
    }

    /// Number of stored events.
    pub async fn count(&self) -> usize {
        self.events.len().await
    }
}
