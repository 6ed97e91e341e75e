//! Route access policy.
//!
//! [`AccessPolicy::decide`] is a pure function of the current user and the
//! guard a route declares. Service operations reuse it through
//! [`authorize`], so the HTTP surface and the domain layer admit exactly the
//! same users.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Role, User};
use crate::error::KeeperError;

/// Roles admitted wherever `admin` is required.
///
/// `host` is never issued by registration but is still accepted here.
pub const ADMIN_EQUIVALENT_ROLES: [Role; 2] = [Role::Admin, Role::Host];

/// Guard that admin-only operations require.
pub const ADMIN_ONLY: RouteGuard = RouteGuard::Roles(&[Role::Admin]);

/// Admission requirement declared by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Reachable without signing in.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users whose role is in the set.
    Roles(&'static [Role]),
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Let the user through.
    Allow,
    /// Nobody is signed in; send them to the login page.
    RedirectToLogin,
    /// Signed in but not permitted; send them home.
    RedirectHome,
}

impl AccessDecision {
    /// Path the client should navigate to, if any.
    #[must_use]
    pub const fn redirect_to(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some("/login"),
            Self::RedirectHome => Some("/"),
        }
    }
}

/// Stateless access policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decides whether `user` may enter a route guarded by `guard`.
    ///
    /// A missing user is always sent to login before any role check. A role
    /// set containing `admin` admits every role in
    /// [`ADMIN_EQUIVALENT_ROLES`]; any other set requires exact membership,
    /// so an empty set admits nobody.
    #[must_use]
    pub fn decide(user: Option<&User>, guard: RouteGuard) -> AccessDecision {
        let required = match guard {
            RouteGuard::Public => return AccessDecision::Allow,
            RouteGuard::Authenticated => None,
            RouteGuard::Roles(roles) => Some(roles),
        };
        let Some(user) = user else {
            return AccessDecision::RedirectToLogin;
        };
        let admitted = match required {
            None => true,
            Some(roles) if roles.contains(&Role::Admin) => {
                ADMIN_EQUIVALENT_ROLES.contains(&user.role)
            }
            Some(roles) => roles.contains(&user.role),
        };
        if admitted {
            AccessDecision::Allow
        } else {
            AccessDecision::RedirectHome
        }
    }
}

/// Applies the policy and converts a denial into an error.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] when nobody is signed in and
/// [`KeeperError::Forbidden`] when the user's role is not admitted.
pub fn authorize(user: Option<&User>, guard: RouteGuard) -> Result<Option<&User>, KeeperError> {
    match AccessPolicy::decide(user, guard) {
        AccessDecision::Allow => Ok(user),
        AccessDecision::RedirectToLogin => Err(KeeperError::Unauthenticated),
        AccessDecision::RedirectHome => {
            let role = user.map_or("anonymous", |u| u.role.as_str());
            tracing::warn!(role, ?guard, "access denied");
            Err(KeeperError::Forbidden {
                role: role.to_string(),
            })
        }
    }
}

/// Like [`authorize`] for guards that always need a signed-in user.
///
/// # Errors
///
/// Same as [`authorize`]; additionally returns
/// [`KeeperError::Unauthenticated`] if called with [`RouteGuard::Public`]
/// and no user.
pub fn require_user(user: Option<&User>, guard: RouteGuard) -> Result<&User, KeeperError> {
    authorize(user, guard)?.ok_or(KeeperError::Unauthenticated)
}

/// Client-side routes of the application and the guard each declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/forgot-password`
    ForgotPassword,
    /// `/`
    Home,
    /// `/events`
    Events,
    /// `/events/:eventId`
    EventDetail,
    /// `/matches`
    Matches,
    /// `/matches/:matchId`
    MatchDetail,
    /// `/announcements`
    Announcements,
    /// `/admin`
    AdminDashboard,
    /// `/admin/events/create`
    CreateEvent,
    /// `/admin/events/:eventId/matches/create`
    CreateMatch,
}

impl AppRoute {
    /// Resolves a client path to a known route, ignoring a trailing slash.
    #[must_use]
    pub fn resolve(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["forgot-password"] => Self::ForgotPassword,
            ["events"] => Self::Events,
            ["events", _] => Self::EventDetail,
            ["matches"] => Self::Matches,
            ["matches", _] => Self::MatchDetail,
            ["announcements"] => Self::Announcements,
            ["admin"] => Self::AdminDashboard,
            ["admin", "events", "create"] => Self::CreateEvent,
            ["admin", "events", _, "matches", "create"] => Self::CreateMatch,
            _ => return None,
        };
        Some(route)
    }

    /// Guard the route declares.
    #[must_use]
    pub const fn guard(self) -> RouteGuard {
        match self {
            Self::Login | Self::Signup | Self::ForgotPassword => RouteGuard::Public,
            Self::Home
            | Self::Events
            | Self::EventDetail
            | Self::Matches
            | Self::MatchDetail
            | Self::Announcements => RouteGuard::Authenticated,
            Self::AdminDashboard | Self::CreateEvent | Self::CreateMatch => ADMIN_ONLY,
        }
    }
}
