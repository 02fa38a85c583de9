//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::handlers::{
    change_password, create_task, delete_task, list_tasks, login, register, reset_password,
    update_task, AppState,
};
use super::middleware::{
    api_rate_limit, create_cors_layer, inject_token_issuer, login_rate_limit,
    registration_rate_limit, reset_rate_limit, resolve_client_key,
};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, server_config: &ServerConfig) -> Router {
    let limits = app_state.limits.clone();
    let tokens = app_state.tokens.clone();
    let trusted_proxy = server_config.trusted_proxy;

    // Each abuse-prone route gets its own limiter gate
    let login_limits = limits.clone();
    let login_route = Router::new().route("/login", post(login)).layer(
        middleware::from_fn(move |req, next| {
            let limits = login_limits.clone();
            login_rate_limit(limits, req, next)
        }),
    );

    let registration_limits = limits.clone();
    let register_route = Router::new().route("/register", post(register)).layer(
        middleware::from_fn(move |req, next| {
            let limits = registration_limits.clone();
            registration_rate_limit(limits, req, next)
        }),
    );

    let reset_limits = limits.clone();
    let reset_route = Router::new()
        .route("/reset-password", post(reset_password))
        .layer(middleware::from_fn(move |req, next| {
            let limits = reset_limits.clone();
            reset_rate_limit(limits, req, next)
        }));

    // Protected routes authenticate via the AuthUser extractor
    let protected_routes = Router::new()
        .route("/change-password", post(change_password))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", axum::routing::patch(update_task).delete(delete_task));

    let api_routes = Router::new()
        .merge(login_route)
        .merge(register_route)
        .merge(reset_route)
        .merge(protected_routes);

    let general_limits = limits.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&server_config.cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens.clone();
                    inject_token_issuer(tokens, req, next)
                }))
                .layer(middleware::from_fn(move |req, next| {
                    resolve_client_key(trusted_proxy, req, next)
                }))
                .layer(middleware::from_fn(move |req, next| {
                    let limits = general_limits.clone();
                    api_rate_limit(limits, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
