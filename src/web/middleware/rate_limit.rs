//! Rate limiting middleware.
//!
//! Route-class gates in front of the handlers. Each gate resolves the
//! client identity key (inserted by [`resolve_client_key`]) and checks
//! the matching limiter; a full window yields 429 with a fixed message
//! and the request is not forwarded.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};

use crate::rate_limit::RateLimiters;
use crate::web::error::ApiError;

/// Client identity key attached to every request.
#[derive(Debug, Clone)]
pub struct ClientKey(pub String);

/// Extract the client identity from a request.
///
/// Proxy headers are honored only when `trusted_proxy` is set;
/// otherwise the connection's source address is used.
fn client_ip(req: &Request<Body>, trusted_proxy: bool) -> String {
    if trusted_proxy {
        if let Some(forwarded) = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
        {
            // Take the first IP in the chain
            if let Some(ip) = forwarded.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }

        if let Some(real_ip) = req.headers().get("X-Real-IP").and_then(|v| v.to_str().ok()) {
            return real_ip.to_string();
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Middleware that resolves the client identity once per request and
/// attaches it as a [`ClientKey`] extension.
pub async fn resolve_client_key(
    trusted_proxy: bool,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let key = client_ip(&req, trusted_proxy);
    req.extensions_mut().insert(ClientKey(key));
    next.run(req).await
}

/// Read the client key attached by [`resolve_client_key`].
fn key_of(req: &Request<Body>) -> String {
    req.extensions()
        .get::<ClientKey>()
        .map(|k| k.0.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rate limiting middleware for all API traffic.
pub async fn api_rate_limit(limits: Arc<RateLimiters>, req: Request<Body>, next: Next) -> Response {
    let key = key_of(&req);

    if !limits.general.check_and_record(&key) {
        tracing::warn!(client = %key, "API rate limit exceeded");
        return ApiError::too_many_requests("Too many requests. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

/// Rate limiting middleware for the registration endpoint.
pub async fn registration_rate_limit(
    limits: Arc<RateLimiters>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = key_of(&req);

    if !limits.registration.check_and_record(&key) {
        tracing::warn!(client = %key, "Registration rate limit exceeded");
        return ApiError::too_many_requests(
            "Too many registration attempts. Please try again later.",
        )
        .into_response();
    }

    next.run(req).await
}

/// Rate limiting middleware for the password-reset endpoint.
pub async fn reset_rate_limit(
    limits: Arc<RateLimiters>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = key_of(&req);

    if !limits.reset.check_and_record(&key) {
        tracing::warn!(client = %key, "Password reset rate limit exceeded");
        return ApiError::too_many_requests("Too many reset attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

/// Rate limiting middleware for the login endpoint.
///
/// Only checks the failed-attempt window; the login handler records a
/// failure after bad credentials, so successful logins never count.
pub async fn login_rate_limit(
    limits: Arc<RateLimiters>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = key_of(&req);

    if !limits.login.check(&key) {
        tracing::warn!(client = %key, "Login rate limit exceeded");
        return ApiError::too_many_requests("Too many login attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

/// Start a background task that periodically prunes expired windows.
pub fn start_cleanup_task(limits: Arc<RateLimiters>) {
    tokio::spawn(async move {
        // Cleanup interval: 5 minutes
        const CLEANUP_INTERVAL_SECS: u64 = 300;

        let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

        // Skip the first immediate tick
        interval.tick().await;

        loop {
            interval.tick().await;
            limits.cleanup();
        }
    });
}
