//! Registration, sign-in and sessions.

use std::sync::Arc;

use crate::domain::{Role, Session, SessionStore, SessionToken, StoredUser, User, UserDirectory};
use crate::error::KeeperError;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Owns the user directory and the open sessions.
///
/// Password hashing runs on the blocking pool so bcrypt never stalls the
/// async workers.
#[derive(Debug, Clone)]
pub struct IdentityService {
    users: Arc<UserDirectory>,
    sessions: Arc<SessionStore>,
    hash_cost: u32,
}

impl IdentityService {
    /// Creates a service over the given stores, hashing with `hash_cost`.
    #[must_use]
    pub fn new(users: Arc<UserDirectory>, sessions: Arc<SessionStore>, hash_cost: u32) -> Self {
        Self {
            users,
            sessions,
            hash_cost,
        }
    }

    /// Registers a new account. Every registered account is an admin.
    ///
    /// Returns `Ok(None)` when the email is already registered, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] on a blank name or email,
    /// an email without `@`, or a password shorter than
    /// [`MIN_PASSWORD_LENGTH`]; [`KeeperError::Internal`] if hashing fails.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, KeeperError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(KeeperError::ValidationFailed(
                "Please fill in all fields".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(KeeperError::ValidationFailed(format!(
                "not an email address: {email}"
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(KeeperError::ValidationFailed(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }
        if self.users.contains_email(email).await {
            return Ok(None);
        }

        let password_hash = self.hash(password).await?;
        let user = User::new(name, email, Role::Admin);
        let stored = StoredUser {
            user: user.clone(),
            password_hash,
        };
        if !self.users.insert_if_absent(stored).await {
            return Ok(None);
        }
        tracing::info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(Some(user))
    }

    /// Signs in and opens a session.
    ///
    /// Returns `Ok(None)` for an unknown email or a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::Internal`] if the stored hash cannot be
    /// verified.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Session>, KeeperError> {
        let Some(stored) = self.users.find_by_email(email).await else {
            tracing::debug!(email, "login for unknown email");
            return Ok(None);
        };
        let candidate = password.to_string();
        let hash = stored.password_hash;
        let verified =
            tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash)).await??;
        if !verified {
            tracing::debug!(user_id = %stored.user.id, "login with wrong password");
            return Ok(None);
        }
        let session = self.sessions.open(stored.user).await;
        tracing::info!(user_id = %session.user.id, "user signed in");
        Ok(Some(session))
    }

    /// Closes a session. Returns `false` if it was not open.
    pub async fn logout(&self, token: SessionToken) -> bool {
        let closed = self.sessions.close(token).await;
        if closed {
            tracing::info!("user signed out");
        }
        closed
    }

    /// Returns the user signed in with `token`.
    pub async fn current_user(&self, token: SessionToken) -> Option<User> {
        self.sessions.user(token).await
    }

    /// Returns `true` if `email` belongs to an account.
    ///
    /// No message is sent; the caller only learns whether the address is
    /// known.
    pub async fn reset_password(&self, email: &str) -> bool {
        let known = self.users.contains_email(email).await;
        tracing::info!(known, "password reset requested");
        known
    }

    /// All registered users in registration order.
    pub async fn users(&self) -> Vec<User> {
        self.users.list().await
    }

    /// Inserts an account with a known role. Used by the demo seed.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::EmailTaken`] if the email is registered and
    /// [`KeeperError::Internal`] if hashing fails.
    pub async fn provision(&self, user: User, password: &str) -> Result<User, KeeperError> {
        let password_hash = self.hash(password).await?;
        let email = user.email.clone();
        let stored = StoredUser {
            user: user.clone(),
            password_hash,
        };
        if !self.users.insert_if_absent(stored).await {
            return Err(KeeperError::EmailTaken(email));
        }
        Ok(user)
    }

    async fn hash(&self, password: &str) -> Result<String, KeeperError> {
        let password = password.to_string();
        let cost = self.hash_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }
}
