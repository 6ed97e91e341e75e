//! Signed-in sessions keyed by bearer token.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{SessionToken, User};

/// One signed-in user.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token identifying the session.
    pub token: SessionToken,
    /// Signed-in user.
    pub user: User,
    /// Sign-in time.
    pub started_at: DateTime<Utc>,
}

/// Sessions a single user may hold at once.
pub const MAX_SESSIONS_PER_USER: usize = 5;

/// Open sessions. A user may hold up to [`MAX_SESSIONS_PER_USER`] at once;
/// opening one more closes that user's oldest session.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `user` and returns it.
    pub async fn open(&self, user: User) -> Session {
        let session = Session {
            token: SessionToken::new(),
            user,
            started_at: Utc::now(),
        };
        let mut sessions = self.inner.write().await;
        let mut held: Vec<(DateTime<Utc>, SessionToken)> = sessions
            .values()
            .filter(|s| s.user.id == session.user.id)
            .map(|s| (s.started_at, s.token))
            .collect();
        if held.len() >= MAX_SESSIONS_PER_USER {
            held.sort_unstable_by_key(|(started_at, _)| *started_at);
            let excess = held.len() + 1 - MAX_SESSIONS_PER_USER;
            for (_, token) in held.into_iter().take(excess) {
                sessions.remove(&token);
                tracing::debug!(user_id = %session.user.id, "oldest session evicted");
            }
        }
        sessions.insert(session.token, session.clone());
        session
    }

    /// Returns the user behind `token`.
    pub async fn user(&self, token: SessionToken) -> Option<User> {
        self.inner.read().await.get(&token).map(|s| s.user.clone())
    }

    /// Closes a session. Returns `false` if it was not open.
    pub async fn close(&self, token: SessionToken) -> bool {
        self.inner.write().await.remove(&token).is_some()
    }

    /// Number of open sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns `true` if nobody is signed in.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
