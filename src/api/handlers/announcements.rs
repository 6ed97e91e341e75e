//! Announcement handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ListResponse;
use crate::api::extract::Caller;
use crate::app_state::AppState;
use crate::domain::{AnnouncementView, NewAnnouncement, RouteGuard, require_user};
use crate::error::{ErrorResponse, KeeperError};

/// `GET /announcements` — Every announcement, newest first.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/v1/announcements",
    tag = "Announcements",
    summary = "List announcements",
    responses(
        (status = 200, description = "Announcements with event titles", body = ListResponse<AnnouncementView>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn list_announcements(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let announcements = state.announcements.announcements().await;
    Ok(Json(ListResponse::from(announcements)))
}

/// `POST /announcements` — Post to an event (admin only).
///
/// # Errors
///
/// Returns [`KeeperError::Forbidden`] for non-admins,
/// [`KeeperError::ValidationFailed`] for blank fields and
/// [`KeeperError::EventNotFound`] for an unknown event.
#[utoipa::path(
    post,
    path = "/api/v1/announcements",
    tag = "Announcements",
    summary = "Post an announcement",
    request_body = NewAnnouncement,
    responses(
        (status = 201, description = "Announcement posted", body = AnnouncementView),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn post_announcement(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<NewAnnouncement>,
) -> Result<impl IntoResponse, KeeperError> {
    let view = state
        .announcements
        .post_announcement(caller.user(), req)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Announcement routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/announcements",
        get(list_announcements).post(post_announcement),
    )
}
