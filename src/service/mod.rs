//! Service layer: business logic orchestration.
//!
//! Each service holds `Arc`s to the stores it touches and a clone of the
//! [`crate::domain::NoticeBus`]. Admin-only operations check the caller
//! through [`crate::domain::require_user`] before touching any store.

pub mod announcement_service;
pub mod dashboard_service;
pub mod event_service;
pub mod identity_service;
pub mod match_service;

pub use announcement_service::AnnouncementService;
pub use dashboard_service::{DashboardOverview, DashboardService};
pub use event_service::{EventDetail, EventService, JoinCodePolicy, JoinReceipt};
pub use identity_service::{IdentityService, MIN_PASSWORD_LENGTH};
pub use match_service::{MatchDetail, MatchListing, MatchService};
