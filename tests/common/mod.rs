//! Test helpers for Web API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use taskdeck::auth::{AccountService, TokenIssuer};
use taskdeck::config::Config;
use taskdeck::db::Database;
use taskdeck::rate_limit::RateLimiters;
use taskdeck::web::handlers::AppState;
use taskdeck::web::router::{create_health_router, create_router};

/// Signing secret used by test servers.
pub const JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Reset secret used by test servers.
pub const RESET_SECRET: &str = "test-reset-secret";

/// A password that satisfies the policy.
pub const GOOD_PASSWORD: &str = "Valid1Pass!";

/// A second policy-satisfying password.
pub const OTHER_PASSWORD: &str = "Other2Pass!";

/// Create a test configuration with generous rate limits.
///
/// Tests that exercise throttling tighten the relevant window
/// themselves.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config.auth.reset_secret = Some(RESET_SECRET.to_string());
    config.rate_limits.general_max = 10_000;
    config.rate_limits.login_max = 10_000;
    config.rate_limits.registration_max = 10_000;
    config.rate_limits.reset_max = 10_000;
    config
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> TestServer {
    create_test_server_with_config(test_config()).await
}

/// Create a test server with custom configuration.
pub async fn create_test_server_with_config(config: Config) -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let tokens = Arc::new(TokenIssuer::new(&config.auth.jwt_secret));
    let limits = Arc::new(RateLimiters::from_config(&config.rate_limits));
    let accounts = AccountService::new(db.clone(), tokens.clone(), config.auth.reset_secret.clone());

    let app_state = Arc::new(AppState {
        db,
        accounts,
        tokens,
        limits,
    });

    let router = create_router(app_state, &config.server).merge(create_health_router());

    TestServer::new(router).expect("Failed to create test server")
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, username: &str, password: &str) -> Value {
    server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "password": password,
            "displayName": username
        }))
        .await
        .json::<Value>()
}

/// Log in and return the response body.
pub async fn login_user(server: &TestServer, username: &str, password: &str) -> Value {
    server
        .post("/api/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await
        .json::<Value>()
}

/// Register a user, log in, and return a bearer token.
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    register_user(server, username, password).await;
    let body = login_user(server, username, password).await;
    body["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}

/// Format a bearer header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
