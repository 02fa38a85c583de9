//! taskdeck - Multi-user task list backend
//!
//! A small web backend providing account registration/login and CRUD
//! operations on tasks, with optional sharing between users.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod rate_limit;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, AccountError, AccountService, Claims,
    Login, PasswordError, PolicyError, TokenError, TokenIssuer,
};
pub use config::Config;
pub use db::{Database, NewTask, NewUser, Task, TaskRepository, User, UserRepository};
pub use error::{Result, TaskdeckError};
pub use rate_limit::{RateLimitConfig, RateLimiters, RouteLimiter};
pub use web::WebServer;
