//! Status and free-text filtering for event and match lists.

use std::str::FromStr;

use super::{Event, EventStatus, Match, MatchStatus};
use crate::error::KeeperError;

/// Status half of a list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter<S> {
    /// Any status.
    #[default]
    All,
    /// Exactly this status.
    Only(S),
}

impl<S: PartialEq> StatusFilter<S> {
    /// Returns `true` if `status` passes the filter.
    pub fn admits(&self, status: &S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl<S> FromStr for StatusFilter<S>
where
    S: FromStr<Err = KeeperError>,
{
    type Err = KeeperError;

    /// Parses `"all"` or a status name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

/// Status filter combined with a case-insensitive search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter<S> {
    /// Status half.
    pub status: StatusFilter<S>,
    /// Search term; empty matches everything.
    pub search: String,
}

/// Filter over the events list.
pub type EventFilter = ListFilter<EventStatus>;

/// Filter over the matches list.
pub type MatchFilter = ListFilter<MatchStatus>;

impl<S: PartialEq> ListFilter<S> {
    /// Creates a filter from its two halves.
    pub fn new(status: StatusFilter<S>, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
        }
    }

    /// Returns `true` if the item's status passes and one of `fields`
    /// contains the trimmed search term, ignoring case. A blank term admits
    /// every item.
    pub fn admits<'a>(&self, status: &S, fields: impl IntoIterator<Item = &'a str>) -> bool {
        if !self.status.admits(status) {
            return false;
        }
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl EventFilter {
    /// Matches on title, description and venue.
    #[must_use]
    pub fn matches_event(&self, event: &Event) -> bool {
        self.admits(
            &event.status,
            [
                event.title.as_str(),
                event.description.as_str(),
                event.venue.as_str(),
            ],
        )
    }
}

impl MatchFilter {
    /// Matches on title, both team names and the owning event's title.
    #[must_use]
    pub fn matches_match(&self, game: &Match, event_title: Option<&str>) -> bool {
        self.admits(
            &game.status,
            [
                Some(game.title.as_str()),
                Some(game.team_a.as_str()),
                Some(game.team_b.as_str()),
                event_title,
            ]
            .into_iter()
            .flatten(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::EventId;
    use crate::domain::event::fixtures::event;
    use crate::domain::sports_match::fixtures::scheduled;

    fn titles(events: &[Event], filter: &EventFilter) -> Vec<String> {
        events
            .iter()
            .filter(|e| filter.matches_event(e))
            .map(|e| e.title.clone())
            .collect()
    }

    #[test]
    fn event_filter_by_status_and_search() {
        let events = vec![
            event("A Cup", EventStatus::Upcoming),
            event("B League", EventStatus::Completed),
        ];

        let by_status = EventFilter::new(StatusFilter::Only(EventStatus::Upcoming), "");
        assert_eq!(titles(&events, &by_status), vec!["A Cup".to_string()]);

        let by_search = EventFilter::new(StatusFilter::All, "cup");
        assert_eq!(titles(&events, &by_search), vec!["A Cup".to_string()]);

        let both = EventFilter::new(StatusFilter::Only(EventStatus::Completed), "cup");
        assert!(titles(&events, &both).is_empty());

        assert_eq!(titles(&events, &EventFilter::default()).len(), 2);
    }

    #[test]
    fn blank_search_matches_everything() {
        let events = vec![
            event("A Cup", EventStatus::Upcoming),
            event("B League", EventStatus::Completed),
        ];
        let blank = EventFilter::new(StatusFilter::All, "   ");
        assert_eq!(titles(&events, &blank).len(), 2);

        let padded = EventFilter::new(StatusFilter::All, "  cup ");
        assert_eq!(titles(&events, &padded), vec!["A Cup".to_string()]);

        let m = scheduled(EventId::new(), Utc::now());
        assert!(MatchFilter::new(StatusFilter::All, "\t").matches_match(&m, None));
    }

    #[test]
    fn event_filter_searches_venue_and_description() {
        let mut ev = event("Regional", EventStatus::Ongoing);
        ev.venue = "Riverside Park".to_string();
        let filter = EventFilter::new(StatusFilter::All, "RIVERSIDE");
        assert!(filter.matches_event(&ev));
        let filter = EventFilter::new(StatusFilter::All, "regional desc");
        assert!(filter.matches_event(&ev));
    }

    #[test]
    fn match_filter_uses_teams_and_event_title() {
        let m = scheduled(EventId::new(), Utc::now());
        let by_team = MatchFilter::new(StatusFilter::All, "tig");
        assert!(by_team.matches_match(&m, None));

        let by_event = MatchFilter::new(StatusFilter::All, "summer");
        assert!(!by_event.matches_match(&m, None));
        assert!(by_event.matches_match(&m, Some("Summer Games")));

        let wrong_status = MatchFilter::new(StatusFilter::Only(MatchStatus::Ongoing), "");
        assert!(!wrong_status.matches_match(&m, Some("Summer Games")));
    }

    #[test]
    fn status_filter_parses() {
        assert_eq!("all".parse::<StatusFilter<MatchStatus>>().ok(), Some(StatusFilter::All));
        assert_eq!(
            "ongoing".parse::<StatusFilter<MatchStatus>>().ok(),
            Some(StatusFilter::Only(MatchStatus::Ongoing))
        );
        assert!("finished".parse::<StatusFilter<EventStatus>>().is_err());
    }
}
