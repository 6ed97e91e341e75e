//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use super::handlers::{announcements, auth, dashboard, events, matches, system};
use crate::error::ErrorResponse;

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "matchkeeper",
        description = "Sports events, matches, join codes and announcements."
    ),
    paths(
        system::health_handler,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        auth::reset_password,
        auth::list_users,
        events::list_events,
        events::create_event,
        events::get_event,
        events::get_event_by_code,
        events::join_event,
        events::list_event_matches,
        events::create_event_match,
        events::list_event_announcements,
        matches::list_matches,
        matches::match_stats,
        matches::get_match,
        matches::update_match_status,
        announcements::list_announcements,
        announcements::post_announcement,
        dashboard::dashboard,
        dashboard::check_access,
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "System", description = "Health"),
        (name = "Auth", description = "Registration, sessions and users"),
        (name = "Events", description = "Events, join codes and join requests"),
        (name = "Matches", description = "Matches and the status workflow"),
        (name = "Announcements", description = "Event announcements"),
        (name = "Dashboard", description = "Aggregates and route access"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/auth/login",
            "/api/v1/events/{id}/matches",
            "/api/v1/matches/{id}/status",
            "/api/v1/announcements",
            "/api/v1/access",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
