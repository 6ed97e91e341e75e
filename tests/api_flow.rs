//! End-to-end REST flows against a live server.

#![allow(clippy::panic)]

mod common;

use common::{TestServer, create_event, json_body, str_field};
use matchkeeper::domain::Role;
use serde_json::{Value, json};

#[tokio::test]
async fn register_login_and_session_lifecycle() {
    let server = TestServer::start().await;

    let resp = server
        .post(
            "/api/v1/auth/register",
            None,
            json!({ "name": "Ada", "email": "ada@example.com", "password": "secret-pass" }),
        )
        .await;
    assert_eq!(resp.status(), 201);
    let user = json_body(resp).await;
    assert_eq!(str_field(&user, "role"), "admin");
    assert!(user.get("password_hash").is_none());

    let resp = server
        .post(
            "/api/v1/auth/register",
            None,
            json!({ "name": "Ada", "email": "ADA@example.com", "password": "secret-pass" }),
        )
        .await;
    assert_eq!(resp.status(), 409);

    let resp = server
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "wrong-pass" }),
        )
        .await;
    assert_eq!(resp.status(), 401);

    let token = server.login("ada@example.com").await;
    let me = json_body(server.get("/api/v1/auth/me", Some(&token)).await).await;
    assert_eq!(str_field(&me, "email"), "ada@example.com");

    let resp = server.post("/api/v1/auth/logout", Some(&token), json!({})).await;
    assert_eq!(resp.status(), 204);
    let resp = server.get("/api/v1/auth/me", Some(&token)).await;
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn event_join_and_match_workflow() {
    let server = TestServer::start().await;
    server.provision("Ada", "ada@example.com", Role::Admin).await;
    server.provision("Pat", "pat@example.com", Role::Player).await;
    let admin = server.login("ada@example.com").await;
    let player = server.login("pat@example.com").await;

    assert_eq!(server.get("/api/v1/events", None).await.status(), 401);

    let event = create_event(&server, &admin, "Autumn Cup").await;
    let event_id = str_field(&event, "id").to_string();
    let join_code = str_field(&event, "join_code").to_string();
    assert_eq!(join_code.len(), 8);
    assert!(
        join_code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
    assert_eq!(event.get("pending_requests"), Some(&json!([])));

    let resp = server
        .post(
            "/api/v1/events",
            Some(&player),
            json!({ "title": "Nope", "date": "2026-11-01T10:00:00Z", "venue": "Hall" }),
        )
        .await;
    assert_eq!(resp.status(), 403);

    let join = json!({ "join_code": join_code.to_lowercase(), "requested_role": "coach" });
    let resp = server.post("/api/v1/events/join", Some(&player), join.clone()).await;
    assert_eq!(resp.status(), 201);
    let receipt = json_body(resp).await;
    assert!(str_field(&receipt, "message").contains("Autumn Cup"));

    let resp = server.post("/api/v1/events/join", Some(&player), join).await;
    assert_eq!(resp.status(), 409);

    let resp = server
        .post(
            "/api/v1/events/join",
            Some(&player),
            json!({ "join_code": "ZZZZ9999" }),
        )
        .await;
    assert_eq!(resp.status(), 404);

    let detail =
        json_body(server.get(&format!("/api/v1/events/{event_id}"), Some(&player)).await).await;
    let pending = detail
        .get("pending_requests")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    assert_eq!(pending, 1);
    assert_eq!(detail.get("announcements"), Some(&json!([])));

    let resp = server
        .post(
            &format!("/api/v1/events/{event_id}/matches"),
            Some(&admin),
            json!({
                "title": "Final",
                "team_a": "Red",
                "team_b": "Blue",
                "start_time": "2026-11-01T12:00:00Z",
            }),
        )
        .await;
    assert_eq!(resp.status(), 201);
    let game = json_body(resp).await;
    let match_id = str_field(&game, "id").to_string();
    assert_eq!(str_field(&game, "status"), "scheduled");

    let status_path = format!("/api/v1/matches/{match_id}/status");
    let resp = server
        .post(&status_path, Some(&player), json!({ "action": "start" }))
        .await;
    assert_eq!(resp.status(), 403);

    let resp = server
        .post(&status_path, Some(&admin), json!({ "action": "start" }))
        .await;
    assert_eq!(resp.status(), 200);

    let resp = server
        .post(&status_path, Some(&admin), json!({ "status": "scheduled" }))
        .await;
    assert_eq!(resp.status(), 409);

    let resp = server
        .post(
            &status_path,
            Some(&admin),
            json!({ "action": "complete", "score_a": 21, "score_b": 17 }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let game = json_body(resp).await;
    assert_eq!(str_field(&game, "status"), "completed");
    assert_eq!(game.get("score_a"), Some(&json!(21)));
    assert!(game.get("end_time").is_some_and(|v| !v.is_null()));

    let stats = json_body(server.get("/api/v1/matches/stats", Some(&player)).await).await;
    assert_eq!(stats.get("completed"), Some(&json!(1)));
}

#[tokio::test]
async fn list_filters_and_announcements() {
    let server = TestServer::start().await;
    server.provision("Ada", "ada@example.com", Role::Admin).await;
    let admin = server.login("ada@example.com").await;

    let cup = create_event(&server, &admin, "A Cup").await;
    create_event(&server, &admin, "B League").await;
    let cup_id = str_field(&cup, "id").to_string();

    let listed =
        json_body(server.get("/api/v1/events?status=all&search=CUP", Some(&admin)).await).await;
    assert_eq!(listed.get("total"), Some(&json!(1)));

    let resp = server.get("/api/v1/events?status=bogus", Some(&admin)).await;
    assert_eq!(resp.status(), 400);

    let resp = server
        .post(
            "/api/v1/announcements",
            Some(&admin),
            json!({
                "title": "Gates open",
                "content": "At 9am.",
                "event_id": cup_id,
                "priority": "high",
            }),
        )
        .await;
    assert_eq!(resp.status(), 201);
    let posted = json_body(resp).await;
    assert_eq!(str_field(&posted, "event_title"), "A Cup");

    let all = json_body(server.get("/api/v1/announcements", Some(&admin)).await).await;
    assert_eq!(all.get("total"), Some(&json!(1)));
    let for_event = json_body(
        server
            .get(&format!("/api/v1/events/{cup_id}/announcements"), Some(&admin))
            .await,
    )
    .await;
    assert_eq!(for_event.get("total"), Some(&json!(1)));

    let overview = json_body(server.get("/api/v1/dashboard", Some(&admin)).await).await;
    assert_eq!(overview.get("event_count"), Some(&json!(2)));
}

#[tokio::test]
async fn access_checks_and_health() {
    let server = TestServer::start().await;
    server.provision("Pat", "pat@example.com", Role::Player).await;
    server.provision("Hal", "hal@example.com", Role::Host).await;
    let player = server.login("pat@example.com").await;
    let host = server.login("hal@example.com").await;

    let anon = json_body(server.get("/api/v1/access?path=/admin", None).await).await;
    assert_eq!(str_field(&anon, "decision"), "redirect_to_login");
    assert_eq!(str_field(&anon, "redirect_to"), "/login");

    let denied = json_body(server.get("/api/v1/access?path=/admin", Some(&player)).await).await;
    assert_eq!(str_field(&denied, "decision"), "redirect_home");

    let allowed = json_body(
        server
            .get("/api/v1/access?path=/admin/events/create", Some(&host))
            .await,
    )
    .await;
    assert_eq!(str_field(&allowed, "decision"), "allow");

    let unknown = json_body(server.get("/api/v1/access?path=/nowhere", None).await).await;
    assert_eq!(str_field(&unknown, "decision"), "allow");
    assert_eq!(unknown.get("route"), Some(&Value::Null));

    let health = json_body(server.get("/health", None).await).await;
    assert_eq!(str_field(&health, "status"), "healthy");
}
