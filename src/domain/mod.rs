//! Domain layer: records, state machines, access policy and stores.
//!
//! Everything here is transport-agnostic. Stores own the data behind tokio
//! locks; the service layer composes them and publishes [`Notice`]s on the
//! [`NoticeBus`].

pub mod access;
pub mod announcement;
pub mod announcement_store;
pub mod event;
pub mod event_store;
pub mod filter;
pub mod ids;
pub mod join_code;
pub mod match_store;
pub mod notice;
pub mod notice_bus;
pub mod session;
pub mod sports_match;
pub mod user;
pub mod user_directory;

pub use access::{
    ADMIN_EQUIVALENT_ROLES, ADMIN_ONLY, AccessDecision, AccessPolicy, AppRoute, RouteGuard,
    authorize, require_user,
};
pub use announcement::{Announcement, AnnouncementView, NewAnnouncement, Priority};
pub use announcement_store::AnnouncementStore;
pub use event::{
    Event, EventParticipant, EventStatus, JoinRequest, JoinRequestStatus, NewEvent, SportType,
};
pub use event_store::EventStore;
pub use filter::{EventFilter, ListFilter, MatchFilter, StatusFilter};
pub use ids::{
    AnnouncementId, EventId, JoinRequestId, MatchId, ParticipantId, SessionToken, UserId,
};
pub use join_code::{JoinCode, JoinCodeSource, RandomJoinCodes};
pub use match_store::{MatchStore, StatusCounts};
pub use notice::Notice;
pub use notice_bus::NoticeBus;
pub use session::{MAX_SESSIONS_PER_USER, Session, SessionStore};
pub use sports_match::{Match, MatchAction, MatchStatus, NewMatch, Scoreline};
pub use user::{ParticipantRole, Role, User};
pub use user_directory::{StoredUser, UserDirectory};
