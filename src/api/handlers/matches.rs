//! Match handlers: listing, stats, detail and the status workflow.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ListQuery, ListResponse, StatusUpdateRequest};
use crate::api::extract::Caller;
use crate::app_state::AppState;
use crate::domain::{Match, MatchId, MatchStatus, RouteGuard, StatusCounts, require_user};
use crate::error::{ErrorResponse, KeeperError};
use crate::service::{MatchDetail, MatchListing};

/// `GET /matches` — List matches across all events.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without a session and
/// [`KeeperError::ValidationFailed`] for an unknown status.
#[utoipa::path(
    get,
    path = "/api/v1/matches",
    tag = "Matches",
    summary = "List matches",
    description = "Search covers match title, both teams and the event title.",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching matches", body = ListResponse<MatchListing>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn list_matches(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let filter = query.into_filter::<MatchStatus>()?;
    let matches = state.matches.list_matches(&filter).await;
    Ok(Json(ListResponse::from(matches)))
}

/// `GET /matches/stats` — Number of matches per status.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/v1/matches/stats",
    tag = "Matches",
    summary = "Match counts per status",
    responses(
        (status = 200, description = "Counts", body = StatusCounts),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn match_stats(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    Ok(Json(state.matches.status_counts().await))
}

/// `GET /matches/{id}` — Match detail.
///
/// # Errors
///
/// Returns [`KeeperError::MatchNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}",
    tag = "Matches",
    summary = "Get match details",
    description = "Includes the event title and the admin actions valid from the current status.",
    params(
        ("id" = uuid::Uuid, Path, description = "Match UUID"),
    ),
    responses(
        (status = 200, description = "Match detail", body = MatchDetail),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
    )
)]
pub async fn get_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<MatchId>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let detail = state.matches.match_detail(id).await?;
    Ok(Json(detail))
}

/// `POST /matches/{id}/status` — Move a match along its lifecycle (admin only).
///
/// # Errors
///
/// Returns [`KeeperError::Forbidden`] for non-admins,
/// [`KeeperError::MatchNotFound`] for an unknown id,
/// [`KeeperError::ValidationFailed`] unless exactly one of `status` and
/// `action` is given, and [`KeeperError::InvalidTransition`] for a move the
/// lifecycle does not allow.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{id}/status",
    tag = "Matches",
    summary = "Update match status",
    description = "Takes either a target `status` or a named `action` (`start`, `complete`, `cancel`). Scores are applied only when completing.",
    params(
        ("id" = uuid::Uuid, Path, description = "Match UUID"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated match", body = Match),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse),
    )
)]
pub async fn update_match_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<MatchId>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, KeeperError> {
    let next = req.target()?;
    let game = match req.action {
        Some(action) => {
            state
                .matches
                .apply_action(caller.user(), id, action, req.scores)
                .await?
        }
        None => {
            state
                .matches
                .update_match_status(caller.user(), id, next, req.scores)
                .await?
        }
    };
    Ok(Json(game))
}

/// Match routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/matches/stats", get(match_stats))
        .route("/matches/{id}", get(get_match))
        .route("/matches/{id}/status", post(update_match_status))
}
