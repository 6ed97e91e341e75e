//! Shared helpers for integration tests.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;

use matchkeeper::app_state::AppState;
use matchkeeper::config::KeeperConfig;
use matchkeeper::domain::{Role, User};
use serde_json::{Value, json};

/// Password used by every test account.
pub const PASSWORD: &str = "secret-pass";

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    pub http: reqwest::Client,
}

impl TestServer {
    /// Starts the full application on `127.0.0.1:0`.
    pub async fn start() -> Self {
        let config = KeeperConfig {
            password_hash_cost: 4,
            ..KeeperConfig::default()
        };
        let state = AppState::new(&config);
        let app = matchkeeper::build_app(state.clone(), &config);

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind ephemeral port");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            http: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// WebSocket URL of the server, without credentials.
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// WebSocket URL carrying `token` as a query parameter.
    pub fn ws_url_with_token(&self, token: &str) -> String {
        format!("ws://{}/ws?token={token}", self.addr)
    }

    /// Creates an account with `role` directly through the identity service.
    pub async fn provision(&self, name: &str, email: &str, role: Role) -> User {
        let Ok(user) = self
            .state
            .identity
            .provision(User::new(name, email, role), PASSWORD)
            .await
        else {
            panic!("provision {email}");
        };
        user
    }

    /// Logs in over HTTP and returns the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let Ok(resp) = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
        else {
            panic!("login request");
        };
        assert_eq!(resp.status(), 200);
        let body = json_body(resp).await;
        let Some(token) = body.get("token").and_then(Value::as_str) else {
            panic!("login response carries a token: {body}");
        };
        token.to_string()
    }

    /// Sends a JSON POST with an optional bearer token.
    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> reqwest::Response {
        let mut req = self.http.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let Ok(resp) = req.send().await else {
            panic!("POST {path}");
        };
        resp
    }

    /// Sends a GET with an optional bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut req = self.http.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let Ok(resp) = req.send().await else {
            panic!("GET {path}");
        };
        resp
    }
}

/// Reads a response body as JSON.
pub async fn json_body(resp: reqwest::Response) -> Value {
    let Ok(body) = resp.json::<Value>().await else {
        panic!("response body is JSON");
    };
    body
}

/// Reads a string field from a JSON object.
pub fn str_field<'a>(body: &'a Value, key: &str) -> &'a str {
    let Some(value) = body.get(key).and_then(Value::as_str) else {
        panic!("missing string field {key} in {body}");
    };
    value
}

/// Creates an event and returns its JSON.
pub async fn create_event(server: &TestServer, token: &str, title: &str) -> Value {
    let resp = server
        .post(
            "/api/v1/events",
            Some(token),
            json!({
                "title": title,
                "description": "Weekend tournament",
                "date": "2026-11-01T10:00:00Z",
                "venue": "Main Hall",
            }),
        )
        .await;
    assert_eq!(resp.status(), 201);
    json_body(resp).await
}
