//! Home and admin dashboard aggregates.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Event, EventStatus, EventStore, Match, MatchStatus, MatchStore};

/// Items shown per dashboard section.
pub const SECTION_LIMIT: usize = 3;

/// Counts and short lists for the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardOverview {
    /// Number of events.
    pub event_count: usize,
    /// Number of matches.
    pub match_count: usize,
    /// Matches being played.
    pub ongoing_count: usize,
    /// Finished matches.
    pub completed_count: usize,
    /// First few ongoing matches.
    pub ongoing_matches: Vec<Match>,
    /// First few upcoming or ongoing events.
    pub upcoming_events: Vec<Event>,
    /// Completed or scheduled matches, latest start first.
    pub recent_matches: Vec<Match>,
}

/// Read-only aggregation over the event and match stores.
#[derive(Debug, Clone)]
pub struct DashboardService {
    events: Arc<EventStore>,
    matches: Arc<MatchStore>,
}

impl DashboardService {
    /// Creates a new `DashboardService`.
    #[must_use]
    pub fn new(events: Arc<EventStore>, matches: Arc<MatchStore>) -> Self {
        Self { events, matches }
    }

    /// Builds the dashboard from current state.
    pub async fn overview(&self) -> DashboardOverview {
        let events = self.events.list().await;
        let matches = self.matches.list().await;
        summarize(&events, &matches)
    }
}

fn summarize(events: &[Event], matches: &[Match]) -> DashboardOverview {
    let ongoing_count = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Ongoing)
        .count();
    let completed_count = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed)
        .count();

    let ongoing_matches = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Ongoing)
        .take(SECTION_LIMIT)
        .cloned()
        .collect();

    let upcoming_events = events
        .iter()
        .filter(|e| matches!(e.status, EventStatus::Upcoming | EventStatus::Ongoing))
        .take(SECTION_LIMIT)
        .cloned()
        .collect();

    let mut recent: Vec<Match> = matches
        .iter()
        .filter(|m| matches!(m.status, MatchStatus::Completed | MatchStatus::Scheduled))
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    recent.truncate(SECTION_LIMIT);

    DashboardOverview {
        event_count: events.len(),
        match_count: matches.len(),
        ongoing_count,
        completed_count,
        ongoing_matches,
        upcoming_events,
        recent_matches: recent,
    }
}
