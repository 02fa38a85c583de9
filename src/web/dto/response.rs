//! Response DTOs for the Web API.

use serde::Serialize;

use crate::db::{Task, User};

/// Registration response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Always true on success.
    pub success: bool,
    /// ID of the new user.
    pub user_id: i64,
}

impl RegisterResponse {
    /// Create a registration response for a new user ID.
    pub fn new(user_id: i64) -> Self {
        Self {
            success: true,
            user_id,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed session token.
    pub token: String,
    /// User information.
    pub user: UserInfo,
}

/// User information in responses.
///
/// Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name (optional).
    pub display_name: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
}

impl SuccessResponse {
    /// Create a success response.
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Task in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Task title.
    pub title: String,
    /// Whether the task is completed.
    pub completed: bool,
    /// Whether the task is visible to other users.
    pub shared: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            completed: task.completed,
            shared: task.shared,
            created_at: task.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_omits_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password: "$argon2id$secret".to_string(),
            display_name: Some("Alice".to_string()),
            created_at: "2024-01-01 00:00:00".to_string(),
        };

        let info = UserInfo::from(user);
        let json = serde_json::to_string(&info).unwrap();

        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("\"displayName\":\"Alice\""));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_register_response_field_names() {
        let json = serde_json::to_string(&RegisterResponse::new(7)).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"userId\":7"));
    }

    #[test]
    fn test_task_response_field_names() {
        let task = Task {
            id: 3,
            user_id: 1,
            title: "buy milk".to_string(),
            completed: false,
            shared: true,
            created_at: "2024-01-01 00:00:00".to_string(),
        };

        let json = serde_json::to_string(&TaskResponse::from(task)).unwrap();
        assert!(json.contains("\"userId\":1"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"shared\":true"));
    }
}
