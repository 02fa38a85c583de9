//! Request handlers for the Web API.

mod auth;
mod task;

pub use auth::{change_password, login, register, reset_password, AppState};
pub use task::{create_task, delete_task, list_tasks, update_task};
