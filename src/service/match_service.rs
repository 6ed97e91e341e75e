//! Match creation, listing and the status workflow.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    ADMIN_ONLY, EventId, EventStore, Match, MatchAction, MatchFilter, MatchId, MatchStatus,
    MatchStore, NewMatch, Notice, NoticeBus, Scoreline, StatusCounts, User, require_user,
};
use crate::error::KeeperError;

/// A match with the title of its event, as shown in lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchListing {
    /// The match.
    #[serde(flatten)]
    pub game: Match,
    /// Title of the owning event, if it still resolves.
    pub event_title: Option<String>,
}

/// A match with everything its detail view needs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchDetail {
    /// The match.
    #[serde(flatten)]
    pub game: Match,
    /// Title of the owning event, if it still resolves.
    pub event_title: Option<String>,
    /// Admin actions valid in the current status.
    pub available_actions: Vec<MatchAction>,
}

/// Orchestrates match operations and emits notices.
///
/// Every mutation follows the same pattern: authorize, take the match's
/// write lock, mutate, release, publish a notice, log.
#[derive(Debug, Clone)]
pub struct MatchService {
    events: Arc<EventStore>,
    matches: Arc<MatchStore>,
    bus: NoticeBus,
}

impl MatchService {
    /// Creates a new `MatchService`.
    #[must_use]
    pub fn new(events: Arc<EventStore>, matches: Arc<MatchStore>, bus: NoticeBus) -> Self {
        Self {
            events,
            matches,
            bus,
        }
    }

    /// Adds a match to an existing event.
    ///
    /// # Errors
    ///
    /// - [`KeeperError::Unauthenticated`] / [`KeeperError::Forbidden`] unless
    ///   `actor` is an admin.
    /// - [`KeeperError::ValidationFailed`] on blank fields or an initial
    ///   status other than scheduled or ongoing.
    /// - [`KeeperError::EventNotFound`] if the event does not exist.
    pub async fn create_match(
        &self,
        actor: Option<&User>,
        event_id: EventId,
        new: NewMatch,
    ) -> Result<Match, KeeperError> {
        let admin = require_user(actor, ADMIN_ONLY)?;
        new.validate()?;
        let event = self.events.snapshot(event_id).await?;

        let game = new.into_match(event.id, event.sport);
        self.matches.insert(game.clone()).await?;

        let _ = self.bus.publish(Notice::MatchCreated {
            event_id,
            match_id: game.id,
            title: game.title.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(
            match_id = %game.id,
            %event_id,
            created_by = %admin.id,
            status = %game.status,
            "match created"
        );
        Ok(game)
    }

    /// Returns one match.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::MatchNotFound`] for an unknown id.
    pub async fn get_match(&self, id: MatchId) -> Result<Match, KeeperError> {
        self.matches.snapshot(id).await
    }

    /// Returns one match with its event title and available actions.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::MatchNotFound`] for an unknown id.
    pub async fn match_detail(&self, id: MatchId) -> Result<MatchDetail, KeeperError> {
        let game = self.matches.snapshot(id).await?;
        let event_title = self.events.snapshot(game.event_id).await.ok().map(|e| e.title);
        Ok(MatchDetail {
            available_actions: game.status.available_actions().to_vec(),
            event_title,
            game,
        })
    }

    /// Matches passing `filter`, each with its event title.
    pub async fn list_matches(&self, filter: &MatchFilter) -> Vec<MatchListing> {
        let titles = self.events.titles().await;
        self.matches
            .list()
            .await
            .into_iter()
            .filter_map(|game| {
                let event_title = titles.get(&game.event_id).cloned();
                filter
                    .matches_match(&game, event_title.as_deref())
                    .then_some(MatchListing { game, event_title })
            })
            .collect()
    }

    /// Matches of one event in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EventNotFound`] for an unknown event.
    pub async fn matches_for_event(&self, event_id: EventId) -> Result<Vec<Match>, KeeperError> {
        let _ = self.events.get(event_id).await?;
        Ok(self.matches.list_by_event(event_id).await)
    }

    /// Moves a match to `next`.
    ///
    /// Scores are applied only when `next` is completed; a side left out
    /// keeps its stored value.
    ///
    /// # Errors
    ///
    /// - [`KeeperError::Unauthenticated`] / [`KeeperError::Forbidden`] unless
    ///   `actor` is an admin.
    /// - [`KeeperError::MatchNotFound`] for an unknown id.
    /// - [`KeeperError::InvalidTransition`] if `next` is not reachable.
    pub async fn update_match_status(
        &self,
        actor: Option<&User>,
        id: MatchId,
        next: MatchStatus,
        scores: Scoreline,
    ) -> Result<Match, KeeperError> {
        let admin = require_user(actor, ADMIN_ONLY)?;
        let lock = self.matches.get(id).await?;

        let (previous, game) = {
            let mut game = lock.write().await;
            let previous = game.transition(next, scores, Utc::now())?;
            (previous, game.clone())
        };

        let _ = self.bus.publish(Notice::MatchStatusChanged {
            event_id: game.event_id,
            match_id: id,
            from: previous,
            to: next,
            score_a: game.score_a,
            score_b: game.score_b,
            timestamp: Utc::now(),
        });

        tracing::info!(
            match_id = %id,
            from = %previous,
            to = %next,
            by = %admin.id,
            "match status changed"
        );
        Ok(game)
    }

    /// Applies a named admin action; see [`MatchAction::target`].
    ///
    /// # Errors
    ///
    /// Same as [`MatchService::update_match_status`].
    pub async fn apply_action(
        &self,
        actor: Option<&User>,
        id: MatchId,
        action: MatchAction,
        scores: Scoreline,
    ) -> Result<Match, KeeperError> {
        self.update_match_status(actor, id, action.target(), scores)
            .await
    }

    /// Number of matches per status.
    pub async fn status_counts(&self) -> StatusCounts {
        self.matches.counts().await
    }
}
