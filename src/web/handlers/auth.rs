//! Account handlers.

use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::auth::{AccountError, AccountService, TokenIssuer};
use crate::db::Database;
use crate::rate_limit::RateLimiters;
use crate::web::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, SuccessResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, ClientKey};

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Account service.
    pub accounts: AccountService,
    /// Token issuer/verifier.
    pub tokens: Arc<TokenIssuer>,
    /// Rate limiters for all route classes.
    pub limits: Arc<RateLimiters>,
}

/// POST /api/register - Create a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if req.username.is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    if req.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }

    let user_id = state
        .accounts
        .register(&req.username, &req.password, req.display_name)
        .await?;

    Ok(Json(RegisterResponse::new(user_id)))
}

/// POST /api/login - Authenticate and issue a session token.
///
/// Failed attempts count against the per-client login window;
/// successful logins do not.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(ClientKey(client)): Extension<ClientKey>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    match state.accounts.login(&req.username, &req.password).await {
        Ok(login) => Ok(Json(LoginResponse {
            token: login.token,
            user: login.user.into(),
        })),
        Err(err @ AccountError::InvalidCredentials) => {
            state.limits.login.record(&client);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /api/change-password - Change the authenticated user's password.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .accounts
        .change_password(claims.sub, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(SuccessResponse::new()))
}

/// POST /api/reset-password - Out-of-band password recovery.
///
/// Gated by the server-side reset secret, not by any session.
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .accounts
        .reset_password(&req.username, &req.secret_key, &req.new_password)
        .await?;

    Ok(Json(SuccessResponse::new()))
}
