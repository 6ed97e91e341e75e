//! Service error types with HTTP status code mapping.
//!
//! [`KeeperError`] is the central error type. Each variant maps to a
//! specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventId, MatchId, MatchStatus, UserId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2201,
///     "message": "You already have a pending request for this event.",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see table on [`KeeperError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Why a second join request for the same event was refused.
///
/// Determined by the status of the request the user already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateJoin {
    /// The existing request is still waiting for the organizer.
    AlreadyPending,
    /// The existing request was approved.
    AlreadyMember,
    /// The existing request was turned down.
    PreviouslyRejected,
}

impl DuplicateJoin {
    /// User-facing explanation for this refusal.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AlreadyPending => "You already have a pending request for this event.",
            Self::AlreadyMember => "You are already part of this event.",
            Self::PreviouslyRejected => "Your previous request was rejected.",
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                    |
/// |-----------|---------------------|--------------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request                |
/// | 2000–2999 | Not Found / State   | 404 Not Found / 409 Conflict   |
/// | 3000–3999 | Server              | 500 Internal Server Error      |
/// | 4000–4999 | Identity / Access   | 401 Unauthorized / 403 Forbidden |
#[derive(Debug, thiserror::Error)]
pub enum KeeperError {
    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Match with the given ID was not found.
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    /// User with the given ID was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// No event carries the given join code.
    #[error("Invalid join code. Please check and try again.")]
    JoinCodeNotFound(String),

    /// The requested match status change is not an allowed edge.
    #[error("cannot move match from {from} to {to}")]
    InvalidTransition {
        /// Status the match is currently in.
        from: MatchStatus,
        /// Status that was requested.
        to: MatchStatus,
    },

    /// The user already has a join request for this event.
    #[error("{}", .0.message())]
    DuplicateJoinRequest(DuplicateJoin),

    /// Another account already uses this email address.
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// Every join code drawn collided with an existing event.
    #[error("could not allocate a unique join code after {attempts} attempts")]
    JoinCodeExhausted {
        /// Number of codes drawn before giving up.
        attempts: u32,
    },

    /// The operation requires a signed-in user.
    #[error("You must be logged in to perform this action.")]
    Unauthenticated,

    /// The signed-in user's role is not allowed to perform this action.
    #[error("role {role} is not allowed to perform this action")]
    Forbidden {
        /// Role of the rejected user.
        role: String,
    },

    /// Email and password do not match a registered account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<bcrypt::BcryptError> for KeeperError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing: {err}"))
    }
}

impl From<tokio::task::JoinError> for KeeperError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {err}"))
    }
}

impl KeeperError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::ValidationFailed(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::MatchNotFound(_) => 2002,
            Self::UserNotFound(_) => 2003,
            Self::JoinCodeNotFound(_) => 2004,
            Self::InvalidTransition { .. } => 2101,
            Self::DuplicateJoinRequest(DuplicateJoin::AlreadyPending) => 2201,
            Self::DuplicateJoinRequest(DuplicateJoin::AlreadyMember) => 2202,
            Self::DuplicateJoinRequest(DuplicateJoin::PreviouslyRejected) => 2203,
            Self::EmailTaken(_) => 2301,
            Self::Internal(_) => 3000,
            Self::JoinCodeExhausted { .. } => 3002,
            Self::Unauthenticated => 4001,
            Self::Forbidden { .. } => 4002,
            Self::InvalidCredentials => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_)
            | Self::MatchNotFound(_)
            | Self::UserNotFound(_)
            | Self::JoinCodeNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. }
            | Self::DuplicateJoinRequest(_)
            | Self::EmailTaken(_) => StatusCode::CONFLICT,
            Self::Internal(_) | Self::JoinCodeExhausted { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for KeeperError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let details = match &self {
            Self::InvalidTransition { from, .. } => Some(format!(
                "allowed from {from}: {}",
                from.allowed_targets()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
