//! Event handlers: list, create, detail, join-code lookup and join.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{JoinEventRequest, ListQuery, ListResponse};
use crate::api::extract::Caller;
use crate::app_state::AppState;
use crate::domain::{
    AnnouncementView, Event, EventId, EventStatus, Match, NewEvent, NewMatch, RouteGuard,
    require_user,
};
use crate::error::{ErrorResponse, KeeperError};
use crate::service::{EventDetail, JoinReceipt};

/// `GET /events` — List events with optional status and search filters.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without a session and
/// [`KeeperError::ValidationFailed`] for an unknown status.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns events in creation order. `status` is `all` or an event status; `search` matches title, description and venue ignoring case.",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching events", body = ListResponse<Event>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let filter = query.into_filter::<EventStatus>()?;
    let events = state.events.list_events(&filter).await;
    Ok(Json(ListResponse::from(events)))
}

/// `POST /events` — Create an event (admin only).
///
/// # Errors
///
/// Returns [`KeeperError::Forbidden`] for non-admins,
/// [`KeeperError::ValidationFailed`] for blank fields and
/// [`KeeperError::JoinCodeExhausted`] if no join code could be allocated.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event owned by the caller and assigns it a fresh 8-character join code.",
    request_body = NewEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 500, description = "Join codes exhausted", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<NewEvent>,
) -> Result<impl IntoResponse, KeeperError> {
    let event = state.events.create_event(caller.user(), req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events/{id}` — Event detail with its announcements.
///
/// # Errors
///
/// Returns [`KeeperError::EventNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event with announcements", body = EventDetail),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let detail = state.events.event_detail(id).await?;
    Ok(Json(detail))
}

/// `GET /events/by-code/{code}` — Find the event owning a join code.
///
/// # Errors
///
/// Returns [`KeeperError::JoinCodeNotFound`] when no event uses the code.
#[utoipa::path(
    get,
    path = "/api/v1/events/by-code/{code}",
    tag = "Events",
    summary = "Look up an event by join code",
    params(
        ("code" = String, Path, description = "Join code, any case"),
    ),
    responses(
        (status = 200, description = "Event owning the code", body = Event),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Invalid join code", body = ErrorResponse),
    )
)]
pub async fn get_event_by_code(
    State(state): State<AppState>,
    caller: Caller,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let event = state.events.event_by_join_code(&code).await?;
    Ok(Json(event))
}

/// `POST /events/join` — Ask to join an event by its code.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without a session,
/// [`KeeperError::JoinCodeNotFound`] for an unknown code and
/// [`KeeperError::DuplicateJoinRequest`] if the caller already asked.
#[utoipa::path(
    post,
    path = "/api/v1/events/join",
    tag = "Events",
    summary = "Request to join an event",
    description = "Files a pending join request for the caller. The code is matched ignoring case.",
    request_body = JoinEventRequest,
    responses(
        (status = 201, description = "Request filed", body = JoinReceipt),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Invalid join code", body = ErrorResponse),
        (status = 409, description = "Already requested", body = ErrorResponse),
    )
)]
pub async fn join_event(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<JoinEventRequest>,
) -> Result<impl IntoResponse, KeeperError> {
    let receipt = state
        .events
        .request_to_join(caller.user(), &req.join_code, req.requested_role)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// `GET /events/{id}/matches` — Matches of one event.
///
/// # Errors
///
/// Returns [`KeeperError::EventNotFound`] for an unknown event.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/matches",
    tag = "Events",
    summary = "List an event's matches",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Matches in creation order", body = ListResponse<Match>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_event_matches(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let matches = state.matches.matches_for_event(id).await?;
    Ok(Json(ListResponse::from(matches)))
}

/// `POST /events/{id}/matches` — Add a match to an event (admin only).
///
/// # Errors
///
/// Returns [`KeeperError::Forbidden`] for non-admins,
/// [`KeeperError::EventNotFound`] for an unknown event and
/// [`KeeperError::ValidationFailed`] for bad input.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/matches",
    tag = "Events",
    summary = "Create a match",
    description = "Adds a match to the event. It starts `scheduled` unless `ongoing` is given; the sport defaults to the event's.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = NewMatch,
    responses(
        (status = 201, description = "Match created", body = Match),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn create_event_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<EventId>,
    Json(req): Json<NewMatch>,
) -> Result<impl IntoResponse, KeeperError> {
    let game = state.matches.create_match(caller.user(), id, req).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// `GET /events/{id}/announcements` — Announcements of one event.
///
/// # Errors
///
/// Returns [`KeeperError::EventNotFound`] for an unknown event.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/announcements",
    tag = "Events",
    summary = "List an event's announcements",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Announcements, newest first", body = ListResponse<AnnouncementView>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_event_announcements(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), RouteGuard::Authenticated)?;
    let announcements = state.announcements.announcements_for_event(id).await?;
    Ok(Json(ListResponse::from(announcements)))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/join", post(join_event))
        .route("/events/by-code/{code}", get(get_event_by_code))
        .route("/events/{id}", get(get_event))
        .route(
            "/events/{id}/matches",
            get(list_event_matches).post(create_event_match),
        )
        .route("/events/{id}/announcements", get(list_event_announcements))
}
