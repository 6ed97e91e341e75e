//! Registered users and their password hashes.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{User, UserId};

/// A user together with the bcrypt hash of their password.
#[derive(Debug, Clone)]
pub struct StoredUser {
    /// Public user record.
    pub user: User,
    /// bcrypt hash.
    pub password_hash: String,
}

#[derive(Debug, Default)]
struct Directory {
    order: Vec<UserId>,
    by_id: HashMap<UserId, StoredUser>,
    by_email: HashMap<String, UserId>,
}

/// User storage keyed by id and by lower-cased email.
#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<Directory>,
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `stored` unless its email is already registered.
    ///
    /// Returns `false` when the email is taken; nothing is written then.
    pub async fn insert_if_absent(&self, stored: StoredUser) -> bool {
        let key = email_key(&stored.user.email);
        let mut dir = self.inner.write().await;
        if dir.by_email.contains_key(&key) {
            return false;
        }
        let id = stored.user.id;
        dir.by_email.insert(key, id);
        dir.order.push(id);
        dir.by_id.insert(id, stored);
        true
    }

    /// Returns `true` if `email` is registered, ignoring case.
    pub async fn contains_email(&self, email: &str) -> bool {
        self.inner
            .read()
            .await
            .by_email
            .contains_key(&email_key(email))
    }

    /// Looks a user up by email, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> Option<StoredUser> {
        let dir = self.inner.read().await;
        dir.by_email
            .get(&email_key(email))
            .and_then(|id| dir.by_id.get(id))
            .cloned()
    }

    /// Looks a user up by id.
    pub async fn get(&self, id: UserId) -> Option<User> {
        self.inner.read().await.by_id.get(&id).map(|s| s.user.clone())
    }

    /// All users in registration order.
    pub async fn list(&self) -> Vec<User> {
        let dir = self.inner.read().await;
        dir.order
            .iter()
            .filter_map(|id| dir.by_id.get(id))
            .map(|s| s.user.clone())
            .collect()
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// Returns `true` if nobody registered yet.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.order.is_empty()
    }
}
