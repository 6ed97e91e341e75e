//! Concurrent event storage with per-event locking.
//!
//! [`EventStore`] keeps events in insertion order behind a
//! [`tokio::sync::RwLock`]; each event is individually wrapped in an
//! `Arc<RwLock<Event>>` so that join requests on different events do not
//! contend. A join-code index lives under the same outer lock, which lets
//! code allocation and insertion happen in one critical section.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::join_code::{self, JoinCode, JoinCodeSource};
use super::{Event, EventId};
use crate::error::KeeperError;

#[derive(Debug, Default)]
struct EventIndex {
    order: Vec<EventId>,
    by_id: HashMap<EventId, Arc<RwLock<Event>>>,
    by_code: HashMap<JoinCode, EventId>,
}

/// Central store for all events.
///
/// # Concurrency
///
/// - Readers of different events never block each other.
/// - A join request holds only its event's write lock, so the duplicate
///   check and the append are atomic per (user, event).
/// - Creating an event holds the outer write lock while drawing its code.
#[derive(Debug, Default)]
pub struct EventStore {
    inner: RwLock<EventIndex>,
}

impl EventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully built event.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] if the id or join code is
    /// already in use.
    pub async fn insert(&self, event: Event) -> Result<EventId, KeeperError> {
        let mut index = self.inner.write().await;
        if index.by_id.contains_key(&event.id) {
            return Err(KeeperError::ValidationFailed(format!(
                "event {} already exists",
                event.id
            )));
        }
        if index.by_code.contains_key(&event.join_code) {
            return Err(KeeperError::ValidationFailed(format!(
                "join code {} already in use",
                event.join_code
            )));
        }
        let id = event.id;
        index.by_code.insert(event.join_code.clone(), id);
        index.order.push(id);
        index.by_id.insert(id, Arc::new(RwLock::new(event)));
        Ok(id)
    }

    /// Draws a join code unused by any stored event, builds the event with
    /// it and inserts it, all under one write lock.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::JoinCodeExhausted`] if `max_attempts` draws all
    /// collided.
    pub async fn insert_with_code(
        &self,
        codes: &dyn JoinCodeSource,
        max_attempts: u32,
        build: impl FnOnce(JoinCode) -> Event,
    ) -> Result<Event, KeeperError> {
        let mut index = self.inner.write().await;
        let code = join_code::draw_unique(codes, max_attempts, |c| index.by_code.contains_key(c))?;
        let event = build(code);
        let id = event.id;
        index.by_code.insert(event.join_code.clone(), id);
        index.order.push(id);
        index.by_id.insert(id, Arc::new(RwLock::new(event.clone())));
        Ok(event)
    }

    /// Returns the lock guarding one event.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EventNotFound`] if no such event exists.
    pub async fn get(&self, id: EventId) -> Result<Arc<RwLock<Event>>, KeeperError> {
        let index = self.inner.read().await;
        index
            .by_id
            .get(&id)
            .cloned()
            .ok_or(KeeperError::EventNotFound(id))
    }

    /// Returns a copy of one event.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EventNotFound`] if no such event exists.
    pub async fn snapshot(&self, id: EventId) -> Result<Event, KeeperError> {
        let lock = self.get(id).await?;
        let event = lock.read().await;
        Ok(event.clone())
    }

    /// Returns the lock guarding the event that owns `code`.
    pub async fn find_by_code(&self, code: &JoinCode) -> Option<Arc<RwLock<Event>>> {
        let index = self.inner.read().await;
        index
            .by_code
            .get(code)
            .and_then(|id| index.by_id.get(id))
            .cloned()
    }

    /// Returns copies of all events in insertion order.
    pub async fn list(&self) -> Vec<Event> {
        let index = self.inner.read().await;
        let mut events = Vec::with_capacity(index.order.len());
        for id in &index.order {
            if let Some(lock) = index.by_id.get(id) {
                events.push(lock.read().await.clone());
            }
        }
        events
    }

    /// Returns the title of every event keyed by id.
    pub async fn titles(&self) -> HashMap<EventId, String> {
        let index = self.inner.read().await;
        let mut titles = HashMap::with_capacity(index.by_id.len());
        for (id, lock) in &index.by_id {
            titles.insert(*id, lock.read().await.title.clone());
        }
        titles
    }

    /// Returns the number of events.
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// Returns `true` if the store holds no events.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.order.is_empty()
    }
}
