//! Per-connection subscription manager.
//!
//! Tracks which events a WebSocket client follows and filters notices
//! server-side.

use std::collections::HashSet;

use crate::domain::EventId;

/// Wildcard target accepted by `subscribe`.
pub const WILDCARD: &str = "*";

/// Subscription targets parsed from a command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Targets {
    /// Well-formed event ids.
    pub ids: Vec<EventId>,
    /// Whether `"*"` was present.
    pub wildcard: bool,
    /// Entries that were neither an id nor the wildcard.
    pub rejected: Vec<String>,
}

impl Targets {
    /// Splits raw command entries into ids, wildcard and rejects.
    #[must_use]
    pub fn parse(raw: &[String]) -> Self {
        let mut targets = Self::default();
        for entry in raw {
            if entry == WILDCARD {
                targets.wildcard = true;
            } else if let Ok(id) = entry.parse::<EventId>() {
                targets.ids.push(id);
            } else {
                targets.rejected.push(entry.clone());
            }
        }
        targets
    }
}

/// Manages the event subscriptions of a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Followed events. Ignored while `all_events` is set.
    event_ids: HashSet<EventId>,
    all_events: bool,
}

impl SubscriptionManager {
    /// Creates a manager that follows nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the listed events, or everything when `wildcard` is set.
    pub fn subscribe(&mut self, ids: &[EventId], wildcard: bool) {
        if wildcard {
            self.all_events = true;
        }
        self.event_ids.extend(ids.iter().copied());
    }

    /// Stops following the listed events. A wildcard in `targets` clears
    /// the wildcard subscription.
    pub fn unsubscribe(&mut self, ids: &[EventId], wildcard: bool) {
        if wildcard {
            self.all_events = false;
        }
        for id in ids {
            self.event_ids.remove(id);
        }
    }

    /// Returns `true` if notices for `event_id` should be forwarded.
    #[must_use]
    pub fn matches(&self, event_id: EventId) -> bool {
        self.all_events || self.event_ids.contains(&event_id)
    }

    /// Number of explicitly followed events.
    #[must_use]
    pub fn count(&self) -> usize {
        self.event_ids.len()
    }

    /// Returns `true` while the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.all_events
    }
}
