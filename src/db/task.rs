//! Task model and repository for taskdeck.
//!
//! Tasks belong to a single owner. A task marked as shared is visible
//! to every user but can only be modified by its owner.

use sqlx::SqlitePool;

use crate::{Result, TaskdeckError};

/// Task entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID.
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

/// Data for creating a new task.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Owning user ID.
    pub user_id: i64,
    /// Task title.
    pub title: String,
    /// Whether the task is visible to other users.
    pub shared: bool,
}

/// Repository for task CRUD operations.
pub struct TaskRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TaskRepository<'a> {
    /// Create a new TaskRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new task, returning the stored row.
    pub async fn create(&self, new_task: &NewTask) -> Result<Task> {
        let result = sqlx::query("INSERT INTO tasks (user_id, title, shared) VALUES (?, ?, ?)")
            .bind(new_task.user_id)
            .bind(&new_task.title)
            .bind(new_task.shared)
            .execute(self.pool)
            .await
            .map_err(|e| TaskdeckError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| TaskdeckError::NotFound("task".to_string()))
    }

    /// Get a task by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let result = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, completed, shared, created_at
             FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| TaskdeckError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List tasks visible to a user: their own plus all shared tasks,
    /// newest first.
    pub async fn list_visible(&self, user_id: i64) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, completed, shared, created_at
             FROM tasks WHERE user_id = ? OR shared = 1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| TaskdeckError::Database(e.to_string()))?;

        Ok(tasks)
    }

    /// Set the completed flag on a task owned by the given user.
    ///
    /// Returns true if a row was updated; false when the task does not
    /// exist or belongs to someone else.
    pub async fn set_completed(&self, id: i64, user_id: i64, completed: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE tasks SET completed = ? WHERE id = ? AND user_id = ?")
            .bind(completed)
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| TaskdeckError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a task owned by the given user.
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| TaskdeckError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
