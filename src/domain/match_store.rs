//! Concurrent match storage.
//!
//! Same layout as the event store: an outer lock over the index, one lock
//! per match. Status changes take only the match's own write lock, so the
//! transition check and the write form one atomic step.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::{EventId, Match, MatchId, MatchStatus};
use crate::error::KeeperError;

/// Number of matches in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    /// `scheduled` matches.
    pub scheduled: usize,
    /// `ongoing` matches.
    pub ongoing: usize,
    /// `completed` matches.
    pub completed: usize,
    /// `cancelled` matches.
    pub cancelled: usize,
}

impl StatusCounts {
    /// Sum over all statuses.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.scheduled + self.ongoing + self.completed + self.cancelled
    }

    fn bump(&mut self, status: MatchStatus) {
        let slot = match status {
            MatchStatus::Scheduled => &mut self.scheduled,
            MatchStatus::Ongoing => &mut self.ongoing,
            MatchStatus::Completed => &mut self.completed,
            MatchStatus::Cancelled => &mut self.cancelled,
        };
        *slot += 1;
    }
}

#[derive(Debug, Default)]
struct MatchIndex {
    order: Vec<MatchId>,
    by_id: HashMap<MatchId, Arc<RwLock<Match>>>,
}

/// Central store for all matches.
#[derive(Debug, Default)]
pub struct MatchStore {
    inner: RwLock<MatchIndex>,
}

impl MatchStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a match.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] if the id is already used.
    pub async fn insert(&self, game: Match) -> Result<MatchId, KeeperError> {
        let mut index = self.inner.write().await;
        if index.by_id.contains_key(&game.id) {
            return Err(KeeperError::ValidationFailed(format!(
                "match {} already exists",
                game.id
            )));
        }
        let id = game.id;
        index.order.push(id);
        index.by_id.insert(id, Arc::new(RwLock::new(game)));
        Ok(id)
    }

    /// Returns the lock guarding one match.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::MatchNotFound`] if no such match exists.
    pub async fn get(&self, id: MatchId) -> Result<Arc<RwLock<Match>>, KeeperError> {
        self.inner
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or(KeeperError::MatchNotFound(id))
    }

    /// Returns a copy of one match.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::MatchNotFound`] if no such match exists.
    pub async fn snapshot(&self, id: MatchId) -> Result<Match, KeeperError> {
        let lock = self.get(id).await?;
        let game = lock.read().await;
        Ok(game.clone())
    }

    /// Returns copies of all matches in insertion order.
    pub async fn list(&self) -> Vec<Match> {
        let index = self.inner.read().await;
        let mut matches = Vec::with_capacity(index.order.len());
        for id in &index.order {
            if let Some(lock) = index.by_id.get(id) {
                matches.push(lock.read().await.clone());
            }
        }
        matches
    }

    /// Returns the matches of one event in insertion order.
    pub async fn list_by_event(&self, event_id: EventId) -> Vec<Match> {
        let mut matches = self.list().await;
        matches.retain(|m| m.event_id == event_id);
        matches
    }

    /// Counts matches per status.
    pub async fn counts(&self) -> StatusCounts {
        let index = self.inner.read().await;
        let mut counts = StatusCounts::default();
        for lock in index.by_id.values() {
            counts.bump(lock.read().await.status);
        }
        counts
    }

    /// Returns the number of matches.
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// Returns `true` if the store holds no matches.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.order.is_empty()
    }
}
