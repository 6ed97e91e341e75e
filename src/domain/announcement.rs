//! Announcements posted to an event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AnnouncementId, EventId, User, UserId};
use crate::error::KeeperError;

/// How prominently an announcement is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Informational.
    Low,
    /// Normal.
    #[default]
    Medium,
    /// Urgent.
    High,
}

/// A stored announcement. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Announcement {
    /// Unique identifier.
    pub id: AnnouncementId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Event the announcement belongs to.
    pub event_id: EventId,
    /// Author.
    pub created_by: UserId,
    /// Author's name at posting time.
    pub created_by_name: String,
    /// Posting time.
    pub created_at: DateTime<Utc>,
    /// Display priority.
    pub priority: Priority,
}

/// Announcement joined with its event's title for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AnnouncementView {
    /// The stored announcement.
    #[serde(flatten)]
    pub announcement: Announcement,
    /// Title of the owning event at read time.
    pub event_title: String,
}

/// Caller-supplied fields for a new announcement.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewAnnouncement {
    /// Headline (required).
    pub title: String,
    /// Body text (required).
    pub content: String,
    /// Target event.
    pub event_id: EventId,
    /// Display priority, `medium` when omitted.
    #[serde(default)]
    pub priority: Priority,
}

impl NewAnnouncement {
    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] if title or content is blank.
    pub fn validate(&self) -> Result<(), KeeperError> {
        if self.title.trim().is_empty() {
            return Err(KeeperError::ValidationFailed("title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(KeeperError::ValidationFailed(
                "content is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the stored announcement authored by `author`.
    #[must_use]
    pub fn into_announcement(self, author: &User) -> Announcement {
        Announcement {
            id: AnnouncementId::new(),
            title: self.title.trim().to_string(),
            content: self.content,
            event_id: self.event_id,
            created_by: author.id,
            created_by_name: author.name.clone(),
            created_at: Utc::now(),
            priority: self.priority,
        }
    }
}
