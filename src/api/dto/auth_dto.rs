//! Request and response bodies for the `/auth` endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{SessionToken, User};

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address, unique ignoring case.
    pub email: String,
    /// Plain-text password, at least six characters.
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address, matched ignoring case.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: SessionToken,
    /// The signed-in user.
    pub user: User,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    /// Address to send reset instructions to.
    pub email: String,
}

/// Response body for `POST /auth/reset-password`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetPasswordResponse {
    /// Whether the address belongs to an account.
    pub known: bool,
    /// Message to show.
    pub message: String,
}
