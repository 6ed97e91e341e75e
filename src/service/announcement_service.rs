//! Posting and reading announcements.

use std::sync::Arc;

use crate::domain::{
    ADMIN_ONLY, Announcement, AnnouncementStore, AnnouncementView, EventId, EventStore,
    NewAnnouncement, Notice, NoticeBus, User, require_user,
};
use crate::error::KeeperError;

/// Orchestrates announcement operations.
///
/// Announcements are stored once; event titles are joined in on every read.
#[derive(Debug, Clone)]
pub struct AnnouncementService {
    events: Arc<EventStore>,
    announcements: Arc<AnnouncementStore>,
    bus: NoticeBus,
}

impl AnnouncementService {
    /// Creates a new `AnnouncementService`.
    #[must_use]
    pub fn new(
        events: Arc<EventStore>,
        announcements: Arc<AnnouncementStore>,
        bus: NoticeBus,
    ) -> Self {
        Self {
            events,
            announcements,
            bus,
        }
    }

    /// Posts an announcement to an existing event.
    ///
    /// # Errors
    ///
    /// - [`KeeperError::Unauthenticated`] / [`KeeperError::Forbidden`] unless
    ///   `actor` is an admin.
    /// - [`KeeperError::ValidationFailed`] on a blank title or content.
    /// - [`KeeperError::EventNotFound`] if the event does not exist.
    pub async fn post_announcement(
        &self,
        actor: Option<&User>,
        new: NewAnnouncement,
    ) -> Result<AnnouncementView, KeeperError> {
        let author = require_user(actor, ADMIN_ONLY)?;
        new.validate()?;
        let event = self.events.snapshot(new.event_id).await?;

        let announcement = new.into_announcement(author);
        self.announcements.insert(announcement.clone()).await;

        let _ = self.bus.publish(Notice::AnnouncementPosted {
            event_id: event.id,
            announcement_id: announcement.id,
            title: announcement.title.clone(),
            timestamp: announcement.created_at,
        });

        tracing::info!(
            announcement_id = %announcement.id,
            event_id = %event.id,
            priority = ?announcement.priority,
            "announcement posted"
        );
        Ok(AnnouncementView {
            announcement,
            event_title: event.title,
        })
    }

    /// All announcements, newest first.
    pub async fn announcements(&self) -> Vec<AnnouncementView> {
        let all = self.announcements.list().await;
        self.join_titles(all).await
    }

    /// Announcements of one event, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EventNotFound`] for an unknown event.
    pub async fn announcements_for_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AnnouncementView>, KeeperError> {
        let event = self.events.snapshot(event_id).await?;
        Ok(self
            .announcements
            .list_by_event(event_id)
            .await
            .into_iter()
            .map(|announcement| AnnouncementView {
                announcement,
                event_title: event.title.clone(),
            })
            .collect())
    }

    async fn join_titles(&self, announcements: Vec<Announcement>) -> Vec<AnnouncementView> {
        let titles = self.events.titles().await;
        announcements
            .into_iter()
            .map(|announcement| {
                let event_title = titles
                    .get(&announcement.event_id)
                    .cloned()
                    .unwrap_or_default();
                AnnouncementView {
                    announcement,
                    event_title,
                }
            })
            .collect()
    }
}
