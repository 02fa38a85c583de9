//! Task handlers.
//!
//! Ownership-filtered row operations: a user sees their own tasks plus
//! shared ones, and can only modify their own.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::auth::AppState;
use crate::db::{NewTask, TaskRepository};
use crate::web::dto::{
    CreateTaskRequest, SuccessResponse, TaskResponse, UpdateTaskRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/tasks - List the caller's tasks plus shared ones.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let repo = TaskRepository::new(state.db.pool());
    let tasks = repo.list_visible(claims.sub).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/tasks - Create a task owned by the caller.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let repo = TaskRepository::new(state.db.pool());
    let task = repo
        .create(&NewTask {
            user_id: claims.sub,
            title: req.title,
            shared: req.shared,
        })
        .await?;

    Ok(Json(task.into()))
}

/// PATCH /api/tasks/:id - Set the completed flag on an owned task.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let repo = TaskRepository::new(state.db.pool());
    if !repo.set_completed(id, claims.sub, req.completed).await? {
        return Err(ApiError::not_found("Task not found"));
    }

    Ok(Json(SuccessResponse::new()))
}

/// DELETE /api/tasks/:id - Delete an owned task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let repo = TaskRepository::new(state.db.pool());
    if !repo.delete(id, claims.sub).await? {
        return Err(ApiError::not_found("Task not found"));
    }

    Ok(Json(SuccessResponse::new()))
}
