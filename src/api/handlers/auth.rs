//! Identity handlers: register, login, logout, current user, password reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ListResponse, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    ResetPasswordResponse,
};
use crate::api::extract::Caller;
use crate::app_state::AppState;
use crate::domain::{ADMIN_ONLY, RouteGuard, User, require_user};
use crate::error::{ErrorResponse, KeeperError};

/// `POST /auth/register` — Create an account.
///
/// # Errors
///
/// Returns [`KeeperError::EmailTaken`] for a registered email and
/// [`KeeperError::ValidationFailed`] for bad input.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    summary = "Register",
    description = "Creates an account. Every new account has the admin role.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, KeeperError> {
    let user = state
        .identity
        .register(&req.name, &req.email, &req.password)
        .await?
        .ok_or_else(|| KeeperError::EmailTaken(req.email.trim().to_string()))?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login` — Sign in.
///
/// # Errors
///
/// Returns [`KeeperError::InvalidCredentials`] if the email is unknown or
/// the password does not match.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    summary = "Sign in",
    description = "Verifies the credentials and opens a session. Send the returned token as `Authorization: Bearer <token>`.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, KeeperError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(KeeperError::ValidationFailed(
            "Please enter both email and password".to_string(),
        ));
    }
    let session = state
        .identity
        .login(&req.email, &req.password)
        .await?
        .ok_or(KeeperError::InvalidCredentials)?;
    Ok(Json(LoginResponse {
        token: session.token,
        user: session.user,
    }))
}

/// `POST /auth/logout` — Close the caller's session.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without an open session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    summary = "Sign out",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, KeeperError> {
    let token = caller.token.ok_or(KeeperError::Unauthenticated)?;
    if !state.identity.logout(token).await {
        return Err(KeeperError::Unauthenticated);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/me` — The signed-in user.
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] without an open session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    summary = "Current user",
    responses(
        (status = 200, description = "Signed-in user", body = User),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn me(caller: Caller) -> Result<impl IntoResponse, KeeperError> {
    let user = require_user(caller.user(), RouteGuard::Authenticated)?;
    Ok(Json(user.clone()))
}

/// `POST /auth/reset-password` — Ask for reset instructions.
///
/// # Errors
///
/// Returns [`KeeperError::ValidationFailed`] for an empty email.
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    tag = "Auth",
    summary = "Request a password reset",
    description = "Reports whether the email belongs to an account. No message is actually sent.",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Request processed", body = ResetPasswordResponse),
        (status = 400, description = "Missing email", body = ErrorResponse),
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, KeeperError> {
    if req.email.trim().is_empty() {
        return Err(KeeperError::ValidationFailed(
            "Please enter your email address".to_string(),
        ));
    }
    let known = state.identity.reset_password(&req.email).await;
    let message = if known {
        "Password reset instructions sent to your email!"
    } else {
        "Failed to process password reset. Please try again."
    };
    Ok(Json(ResetPasswordResponse {
        known,
        message: message.to_string(),
    }))
}

/// `GET /users` — All registered users (admin only).
///
/// # Errors
///
/// Returns [`KeeperError::Unauthenticated`] / [`KeeperError::Forbidden`]
/// unless the caller is an admin.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Auth",
    summary = "List users",
    responses(
        (status = 200, description = "Registered users", body = ListResponse<User>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, KeeperError> {
    require_user(caller.user(), ADMIN_ONLY)?;
    let users = state.identity.users().await;
    Ok(Json(ListResponse::from(users)))
}

/// Identity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/auth/reset-password", post(reset_password))
        .route("/users", get(list_users))
}
