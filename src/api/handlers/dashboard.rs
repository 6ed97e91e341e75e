//! Dashboard aggregates and client route access checks.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AccessQuery, AccessResponse};
use crate::api::extract::Caller;
use crate::app_state::AppState;
use crate::domain::{AccessDecision, AccessPolicy, AppRoute, RouteGuard, require_user};
use crate::error::{ErrorResponse, KeeperError};
use crate::service::DashboardOverview;

/// `GET /dashboard` — Counts and short lists for the home page.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Dashboard overview",
    responses(
        (status = 200, description = "Overview", body = DashboardOverview),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    Ok(Json(state.dashboard.overview().await))
}

/// `GET /access?path=` — Whether the caller may open a client route.
///
/// Never fails: anonymous callers get a redirect decision instead of 401.
#[utoipa::path(
    get,
    path = "/api/v1/access",
    tag = "Dashboard",
    summary = "Check route access",
    description = "Applies the route guard of a client path to the caller. Unknown paths are public.",
    params(AccessQuery),
    responses(
        (status = 200, description = "Access decision", body = AccessResponse),
    )
)]
pub async fn check_access(caller: Caller, Query(query): Query<AccessQuery>) -> impl IntoResponse {
    let route = AppRoute::resolve(&query.path);
    let decision = route.map_or(AccessDecision::Allow, |route| {
        AccessPolicy::decide(caller.user(), route.guard())
    });
    Json(AccessResponse {
        path: query.path,
        route,
        decision,
        redirect_to: decision.redirect_to().map(str::to_string),
    })
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/access", get(check_access))
}
