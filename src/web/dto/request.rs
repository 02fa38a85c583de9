//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::no_control_chars;

/// User registration request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Display name (optional).
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Password change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    pub old_password: String,
    /// New password.
    pub new_password: String,
}

/// Out-of-band password reset request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Username of the account to reset.
    pub username: String,
    /// Server-side reset secret.
    pub secret_key: String,
    /// New password.
    pub new_password: String,
}

/// Task creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title.
    #[validate(
        length(min = 1, max = 500, message = "Title must be 1-500 characters"),
        custom(function = "no_control_chars")
    )]
    pub title: String,
    /// Whether the task is visible to other users.
    #[serde(default)]
    pub shared: bool,
}

/// Task update request.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New completed state.
    pub completed: bool,
}
