//! Request extractor resolving the bearer token to a signed-in user.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::{SessionToken, User};

/// The caller of a request, if signed in.
///
/// Reads `Authorization: Bearer <token>`. A missing, malformed or closed
/// token yields an anonymous caller; handlers let the access policy decide
/// what anonymous callers may do.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    /// Token presented by the client, if it parsed.
    pub token: Option<SessionToken>,
    /// User behind an open session.
    pub user: Option<User>,
}

impl Caller {
    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Extracts the session token from an `Authorization` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<SessionToken> {
    header
        .trim()
        .strip_prefix("Bearer ")
        .and_then(|raw| raw.trim().parse().ok())
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token);
        let user = match token {
            Some(token) => state.identity.current_user(token).await,
            None => None,
        };
        Ok(Self { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_header() {
        let token = SessionToken::new();
        assert_eq!(bearer_token(&format!("Bearer {token}")), Some(token));
        assert_eq!(bearer_token(&format!("Basic {token}")), None);
        assert_eq!(bearer_token("Bearer not-a-uuid"), None);
    }
}
