//! Append-only announcement storage.

use tokio::sync::RwLock;

use super::{Announcement, EventId};

/// Announcements in posting order.
#[derive(Debug, Default)]
pub struct AnnouncementStore {
    inner: RwLock<Vec<Announcement>>,
}

impl AnnouncementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an announcement.
    pub async fn insert(&self, announcement: Announcement) {
        self.inner.write().await.push(announcement);
    }

    /// All announcements, newest first.
    pub async fn list(&self) -> Vec<Announcement> {
        let mut all = self.inner.read().await.to_vec();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Announcements of one event, newest first.
    pub async fn list_by_event(&self, event_id: EventId) -> Vec<Announcement> {
        let mut owned: Vec<Announcement> = self
            .inner
            .read()
            .await
            .iter()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }

    /// Number of stored announcements.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns `true` if nothing was posted yet.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::{NewAnnouncement, Priority, Role, User};

    fn post(event_id: EventId, title: &str, minutes_ago: i64) -> Announcement {
        let author = User::new("Ada", "ada@example.com", Role::Admin);
        let mut a = NewAnnouncement {
            title: title.to_string(),
            content: "body".to_string(),
            event_id,
            priority: Priority::Low,
        }
        .into_announcement(&author);
        a.created_at = Utc::now() - Duration::minutes(minutes_ago);
        a
    }

    #[tokio::test]
    async fn newest_first_per_event() {
        let store = AnnouncementStore::new();
        let event_id = EventId::new();
        store.insert(post(event_id, "old", 30)).await;
        store.insert(post(EventId::new(), "elsewhere", 5)).await;
        store.insert(post(event_id, "new", 1)).await;

        let titles: Vec<String> = store
            .list_by_event(event_id)
            .await
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["new", "old"]);

        let all = store.list().await;
        assert_eq!(all.len(), 3);
        assert_eq!(all.first().map(|a| a.title.as_str()), Some("new"));
        assert!(!store.is_empty().await);
    }
}
