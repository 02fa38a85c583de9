//! Middleware for the Web API.

mod auth;
mod cors;
mod rate_limit;

pub use auth::{inject_token_issuer, AuthUser};
pub use cors::create_cors_layer;
pub use rate_limit::{
    api_rate_limit, login_rate_limit, registration_rate_limit, reset_rate_limit,
    resolve_client_key, start_cleanup_task, ClientKey,
};
