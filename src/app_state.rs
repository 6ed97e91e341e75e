//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::KeeperConfig;
use crate::domain::{
    AnnouncementStore, EventStore, JoinCodeSource, MatchStore, NoticeBus, RandomJoinCodes,
    SessionStore, UserDirectory,
};
use crate::service::{
    AnnouncementService, DashboardService, EventService, IdentityService, JoinCodePolicy,
    MatchService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration, sign-in and sessions.
    pub identity: Arc<IdentityService>,
    /// Events and the join workflow.
    pub events: Arc<EventService>,
    /// Matches and the status workflow.
    pub matches: Arc<MatchService>,
    /// Announcements.
    pub announcements: Arc<AnnouncementService>,
    /// Dashboard aggregates.
    pub dashboard: Arc<DashboardService>,
    /// Notice bus for WebSocket subscriptions.
    pub notice_bus: NoticeBus,
}

impl AppState {
    /// Builds empty stores and wires every service from `config`.
    #[must_use]
    pub fn new(config: &KeeperConfig) -> Self {
        Self::with_join_codes(config, Arc::new(RandomJoinCodes))
    }

    /// Like [`AppState::new`] with a custom join-code source.
    #[must_use]
    pub fn with_join_codes(config: &KeeperConfig, codes: Arc<dyn JoinCodeSource>) -> Self {
        let notice_bus = NoticeBus::new(config.notice_bus_capacity);
        let events = Arc::new(EventStore::new());
        let matches = Arc::new(MatchStore::new());
        let announcements = Arc::new(AnnouncementStore::new());

        let identity = IdentityService::new(
            Arc::new(UserDirectory::new()),
            Arc::new(SessionStore::new()),
            config.password_hash_cost,
        );
        let event_service = EventService::new(
            Arc::clone(&events),
            Arc::clone(&announcements),
            JoinCodePolicy {
                source: codes,
                max_attempts: config.join_code_max_attempts,
            },
            config.default_sport,
            notice_bus.clone(),
        );
        let match_service =
            MatchService::new(Arc::clone(&events), Arc::clone(&matches), notice_bus.clone());
        let announcement_service = AnnouncementService::new(
            Arc::clone(&events),
            Arc::clone(&announcements),
            notice_bus.clone(),
        );
        let dashboard = DashboardService::new(events, matches);

        Self {
            identity: Arc::new(identity),
            events: Arc::new(event_service),
            matches: Arc::new(match_service),
            announcements: Arc::new(announcement_service),
            dashboard: Arc::new(dashboard),
            notice_bus,
        }
    }
}
