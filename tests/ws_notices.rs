//! WebSocket notice delivery against a live server.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use common::{TestServer, create_event, json_body, str_field};
use futures_util::{SinkExt, StreamExt};
use matchkeeper::domain::Role;
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderValue, header::AUTHORIZATION};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

type Socket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn connect(url: String) -> Socket {
    let (socket, _) = tokio_test::assert_ok!(tokio_tungstenite::connect_async(url).await);
    socket
}

async fn connect_with_bearer(server: &TestServer, token: &str) -> Socket {
    let Ok(mut request) = server.ws_url().into_client_request() else {
        panic!("valid ws url");
    };
    let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) else {
        panic!("valid header");
    };
    request.headers_mut().insert(AUTHORIZATION, value);
    let (socket, _) = tokio_test::assert_ok!(tokio_tungstenite::connect_async(request).await);
    socket
}

fn assert_unauthorized<T>(result: Result<T, WsError>) {
    let Err(WsError::Http(response)) = result else {
        panic!("upgrade should be refused with an HTTP error");
    };
    assert_eq!(response.status(), 401);
}

async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(5), socket.next()).await
        else {
            panic!("expected a websocket frame");
        };
        if let Message::Text(text) = msg {
            let Ok(value) = serde_json::from_str::<Value>(&text) else {
                panic!("frame is JSON");
            };
            return value;
        }
    }
}

async fn command(socket: &mut Socket, id: &str, payload: Value) -> Value {
    let frame = json!({ "id": id, "type": "command", "payload": payload });
    tokio_test::assert_ok!(socket.send(Message::text(frame.to_string())).await);
    next_json(socket).await
}

async fn subscribe_all(socket: &mut Socket) {
    let reply = command(
        socket,
        "sub",
        json!({ "command": "subscribe", "event_ids": ["*"] }),
    )
    .await;
    assert_eq!(str_field(&reply, "type"), "response");
}

async fn add_match(server: &TestServer, token: &str, event_id: &str, title: &str) -> String {
    let resp = server
        .post(
            &format!("/api/v1/events/{event_id}/matches"),
            Some(token),
            json!({
                "title": title,
                "team_a": "Red",
                "team_b": "Blue",
                "start_time": "2026-11-01T12:00:00Z",
            }),
        )
        .await;
    assert_eq!(resp.status(), 201);
    str_field(&json_body(resp).await, "id").to_string()
}

#[tokio::test]
async fn upgrade_requires_an_open_session() {
    let server = TestServer::start().await;
    server.provision("Pat", "pat@example.com", Role::Player).await;

    assert_unauthorized(tokio_tungstenite::connect_async(server.ws_url()).await);
    assert_unauthorized(
        tokio_tungstenite::connect_async(server.ws_url_with_token("not-a-token")).await,
    );
    let stranger = uuid::Uuid::new_v4().to_string();
    assert_unauthorized(
        tokio_tungstenite::connect_async(server.ws_url_with_token(&stranger)).await,
    );

    let token = server.login("pat@example.com").await;
    let resp = server.post("/api/v1/auth/logout", Some(&token), json!({})).await;
    assert_eq!(resp.status(), 204);
    assert_unauthorized(tokio_tungstenite::connect_async(server.ws_url_with_token(&token)).await);
}

#[tokio::test]
async fn join_codes_reach_organizers_only() {
    let server = TestServer::start().await;
    server.provision("Ada", "ada@example.com", Role::Admin).await;
    server.provision("Pat", "pat@example.com", Role::Player).await;
    let admin = server.login("ada@example.com").await;
    let player = server.login("pat@example.com").await;

    let mut admin_socket = connect(server.ws_url_with_token(&admin)).await;
    let mut player_socket = connect_with_bearer(&server, &player).await;
    subscribe_all(&mut admin_socket).await;
    subscribe_all(&mut player_socket).await;

    let event = create_event(&server, &admin, "Secret Cup").await;
    let join_code = str_field(&event, "join_code").to_string();

    let seen_by_admin = next_json(&mut admin_socket).await;
    assert_eq!(
        seen_by_admin.pointer("/payload/notice_type"),
        Some(&json!("event_created"))
    );
    assert_eq!(
        seen_by_admin.pointer("/payload/join_code"),
        Some(&json!(join_code))
    );

    let seen_by_player = next_json(&mut player_socket).await;
    assert_eq!(
        seen_by_player.pointer("/payload/notice_type"),
        Some(&json!("event_created"))
    );
    assert_eq!(
        seen_by_player.pointer("/payload/title"),
        Some(&json!("Secret Cup"))
    );
    assert!(seen_by_player.pointer("/payload/join_code").is_none());
}

#[tokio::test]
async fn notices_follow_event_subscriptions() {
    let server = TestServer::start().await;
    server.provision("Ada", "ada@example.com", Role::Admin).await;
    let admin = server.login("ada@example.com").await;

    let followed = create_event(&server, &admin, "Followed Cup").await;
    let other = create_event(&server, &admin, "Other Cup").await;
    let followed_id = str_field(&followed, "id").to_string();
    let other_id = str_field(&other, "id").to_string();

    let mut socket = connect(server.ws_url_with_token(&admin)).await;

    let reply = command(
        &mut socket,
        "sub-1",
        json!({ "command": "subscribe", "event_ids": [followed_id, "not-an-id"] }),
    )
    .await;
    assert_eq!(str_field(&reply, "type"), "response");
    assert_eq!(str_field(&reply, "id"), "sub-1");
    assert_eq!(reply.pointer("/payload/count"), Some(&json!(1)));
    assert_eq!(reply.pointer("/payload/rejected"), Some(&json!(["not-an-id"])));

    add_match(&server, &admin, &other_id, "Ignored").await;
    let match_id = add_match(&server, &admin, &followed_id, "Delivered").await;

    let notice = next_json(&mut socket).await;
    assert_eq!(str_field(&notice, "type"), "notice");
    assert_eq!(
        notice.pointer("/payload/notice_type"),
        Some(&json!("match_created"))
    );
    assert_eq!(notice.pointer("/payload/match_id"), Some(&json!(match_id)));

    let reply = command(
        &mut socket,
        "get-1",
        json!({ "command": "get_match", "match_id": match_id }),
    )
    .await;
    assert_eq!(str_field(&reply, "type"), "response");
    assert_eq!(reply.pointer("/payload/title"), Some(&json!("Delivered")));
}

#[tokio::test]
async fn malformed_frames_get_errors() {
    let server = TestServer::start().await;
    server.provision("Pat", "pat@example.com", Role::Player).await;
    let player = server.login("pat@example.com").await;
    let mut socket = connect_with_bearer(&server, &player).await;

    tokio_test::assert_ok!(socket.send(Message::text("{nope")).await);
    let reply = next_json(&mut socket).await;
    assert_eq!(str_field(&reply, "type"), "error");
    assert_eq!(reply.pointer("/payload/code"), Some(&json!(400)));

    let reply = command(&mut socket, "x", json!({ "command": "launch" })).await;
    assert_eq!(str_field(&reply, "type"), "error");
    assert_eq!(reply.pointer("/payload/code"), Some(&json!(404)));
}
