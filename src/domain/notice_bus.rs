//! Broadcast channel for change notices.
//!
//! [`NoticeBus`] wraps a [`tokio::sync::broadcast`] channel. Services publish
//! a [`Notice`] after each mutation; every WebSocket connection subscribes
//! and forwards the notices its client asked for.

use tokio::sync::broadcast;

use super::Notice;

/// Broadcast bus for [`Notice`]s.
///
/// When the ring buffer is full the oldest notices are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Creates a bus holding up to `capacity` undelivered notices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a notice and returns how many receivers got it.
    ///
    /// With no receivers the notice is dropped.
    pub fn publish(&self, notice: Notice) -> usize {
        self.sender.send(notice).unwrap_or(0)
    }

    /// Creates a receiver for all future notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    /// Returns the current number of receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{AnnouncementId, EventId};

    fn posted(event_id: EventId) -> Notice {
        Notice::AnnouncementPosted {
            event_id,
            announcement_id: AnnouncementId::new(),
            title: "Gates open".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = NoticeBus::new(8);
        assert_eq!(bus.publish(posted(EventId::new())), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives() {
        let bus = NoticeBus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        let id = EventId::new();
        assert_eq!(bus.publish(posted(id)), 2);

        let Ok(n1) = rx1.recv().await else {
            panic!("rx1 failed");
        };
        let Ok(n2) = rx2.recv().await else {
            panic!("rx2 failed");
        };
        assert_eq!(n1.event_id(), id);
        assert_eq!(n2.event_id(), id);
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = NoticeBus::new(0);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }
}
