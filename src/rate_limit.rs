//! Fixed-window request rate limiting.
//!
//! Each route class owns a map from client identity key to the current
//! window state. Counts reset when the window elapses. Counters are
//! in-process only; there is no cross-process coordination.
//!
//! Every operation has an `*_at` variant taking the current time, which
//! the public methods feed with `Instant::now()`. Tests drive the `_at`
//! variants directly.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::config::RateLimitsConfig;

/// Configuration for a single route class.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the time window.
    pub max_requests: u32,
    /// Time window duration.
    pub window: Duration,
}

impl RateLimitConfig {
    /// Create a new rate limit configuration.
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// State of one identity's current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    /// When the window started.
    started: Instant,
    /// Requests counted in this window.
    count: u32,
}

/// Fixed-window rate limiter for one route class.
#[derive(Debug)]
pub struct RouteLimiter {
    config: RateLimitConfig,
    windows: RwLock<HashMap<String, Window>>,
}

impl RouteLimiter {
    /// Create a new limiter for a route class.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Check whether a request from `key` is currently allowed,
    /// without counting it.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Clock-injected variant of [`check`](Self::check).
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let windows = self.windows.read().unwrap();
        match windows.get(key) {
            Some(w) if now.duration_since(w.started) < self.config.window => {
                w.count < self.config.max_requests
            }
            _ => true,
        }
    }

    /// Count a request from `key` against the current window.
    pub fn record(&self, key: &str) {
        self.record_at(key, Instant::now());
    }

    /// Clock-injected variant of [`record`](Self::record).
    pub fn record_at(&self, key: &str, now: Instant) {
        let mut windows = self.windows.write().unwrap();
        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.config.window {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;
    }

    /// Check and count in one operation.
    ///
    /// Returns true and counts the request when allowed; returns false
    /// without counting when the window is full.
    pub fn check_and_record(&self, key: &str) -> bool {
        self.check_and_record_at(key, Instant::now())
    }

    /// Clock-injected variant of [`check_and_record`](Self::check_and_record).
    pub fn check_and_record_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.write().unwrap();
        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.config.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.config.max_requests {
            return false;
        }
        window.count += 1;
        true
    }

    /// Drop expired windows to bound memory growth.
    pub fn cleanup(&self) {
        self.cleanup_at(Instant::now());
    }

    /// Clock-injected variant of [`cleanup`](Self::cleanup).
    pub fn cleanup_at(&self, now: Instant) {
        let mut windows = self.windows.write().unwrap();
        windows.retain(|_, w| now.duration_since(w.started) < self.config.window);
    }

    /// Number of identities currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.read().unwrap().len()
    }
}

/// Rate limiters for all route classes.
///
/// - `general`: every `/api/` request.
/// - `login`: failed login attempts only (successes are not counted).
/// - `registration`: every registration attempt.
/// - `reset`: every password-reset attempt.
#[derive(Debug)]
pub struct RateLimiters {
    /// Limiter for all API traffic.
    pub general: RouteLimiter,
    /// Limiter for failed login attempts.
    pub login: RouteLimiter,
    /// Limiter for registration attempts.
    pub registration: RouteLimiter,
    /// Limiter for password-reset attempts.
    pub reset: RouteLimiter,
}

impl RateLimiters {
    /// Create limiters from configuration.
    pub fn from_config(config: &RateLimitsConfig) -> Self {
        Self {
            general: RouteLimiter::new(RateLimitConfig::new(
                config.general_max,
                config.general_window_secs,
            )),
            login: RouteLimiter::new(RateLimitConfig::new(
                config.login_max,
                config.login_window_secs,
            )),
            registration: RouteLimiter::new(RateLimitConfig::new(
                config.registration_max,
                config.registration_window_secs,
            )),
            reset: RouteLimiter::new(RateLimitConfig::new(
                config.reset_max,
                config.reset_window_secs,
            )),
        }
    }

    /// Drop expired windows in every limiter.
    pub fn cleanup(&self) {
        self.general.cleanup();
        self.login.cleanup();
        self.registration.cleanup();
        self.reset.cleanup();
    }
}

impl Default for RateLimiters {
    fn default() -> Self {
        Self::from_config(&RateLimitsConfig::default())
    }
}
