//! Account service for taskdeck.
//!
//! Orchestrates the password policy, credential hasher, token issuer,
//! and user store to implement the register / login / change-password /
//! reset-password flows.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::auth::password::{self, PasswordError};
use crate::auth::policy::{self, PolicyError};
use crate::auth::token::{TokenError, TokenIssuer};
use crate::db::{
    is_unique_violation, Database, NewUser, User, UserRepository, MAX_USERNAME_LENGTH,
    MIN_USERNAME_LENGTH,
};

/// Account operation errors.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Username does not meet the length requirements.
    #[error("username must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters")]
    InvalidUsername,

    /// Password rejected by the policy engine.
    #[error("password error: {0}")]
    Policy(#[from] PolicyError),

    /// Username is already taken.
    #[error("username already exists")]
    DuplicateUsername,

    /// Unknown username or wrong password.
    ///
    /// Deliberately a single variant: callers must not be able to tell
    /// which of the two it was.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Current password did not match on change-password.
    #[error("wrong password")]
    WrongPassword,

    /// Username did not resolve on reset-password.
    #[error("user not found")]
    UserNotFound,

    /// Reset secret mismatch or unconfigured.
    #[error("forbidden")]
    Forbidden,

    /// Token issuance failure.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Internal failure (hashing, store, task join).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<crate::TaskdeckError> for AccountError {
    fn from(e: crate::TaskdeckError) -> Self {
        AccountError::Internal(e.to_string())
    }
}

/// Result of a successful login.
#[derive(Debug)]
pub struct Login {
    /// Signed session token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Account service implementing the credential lifecycle.
#[derive(Clone)]
pub struct AccountService {
    db: Database,
    tokens: Arc<TokenIssuer>,
    reset_secret: Option<String>,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(db: Database, tokens: Arc<TokenIssuer>, reset_secret: Option<String>) -> Self {
        Self {
            db,
            tokens,
            reset_secret,
        }
    }

    /// Hash a password off the async runtime.
    ///
    /// Argon2 takes tens to hundreds of milliseconds, so the work is
    /// moved to the blocking pool.
    async fn hash_offloaded(password: String) -> Result<String, AccountError> {
        tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map_err(|e| AccountError::Internal(e.to_string()))
    }

    /// Verify a password off the async runtime.
    async fn verify_offloaded(password: String, hash: String) -> Result<(), PasswordError> {
        tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .map_err(|e| PasswordError::Hash(e.to_string()))?
    }

    /// Register a new account, returning the new user ID.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<i64, AccountError> {
        let len = username.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
            return Err(AccountError::InvalidUsername);
        }

        policy::validate_password(password)?;

        let password_hash = Self::hash_offloaded(password.to_string()).await?;

        let mut new_user = NewUser::new(username, password_hash);
        if let Some(display_name) = display_name {
            new_user = new_user.with_display_name(display_name);
        }

        let repo = UserRepository::new(self.db.pool());
        let id = repo.create(&new_user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::DuplicateUsername
            } else {
                AccountError::Internal(e.to_string())
            }
        })?;

        info!(username = %username, user_id = id, "User registered");
        Ok(id)
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Unknown usernames and wrong passwords both produce
    /// [`AccountError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Login, AccountError> {
        let repo = UserRepository::new(self.db.pool());
        let user = match repo.get_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username = %username, "Login failed: no match");
                return Err(AccountError::InvalidCredentials);
            }
        };

        match Self::verify_offloaded(password.to_string(), user.password.clone()).await {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => {
                warn!(username = %username, "Login failed: no match");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(AccountError::Internal(e.to_string())),
        }

        let token = self.tokens.issue(user.id, &user.username)?;

        info!(username = %user.username, user_id = user.id, "Login successful");
        Ok(Login { token, user })
    }

    /// Change an authenticated user's password.
    ///
    /// The stored hash is untouched unless the old password verifies
    /// and the new password passes the policy.
    pub async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let repo = UserRepository::new(self.db.pool());
        let user = repo
            .get_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        match Self::verify_offloaded(old_password.to_string(), user.password.clone()).await {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => {
                warn!(user_id = user_id, "Password change failed: wrong password");
                return Err(AccountError::WrongPassword);
            }
            Err(e) => return Err(AccountError::Internal(e.to_string())),
        }

        self.store_new_password(&user, new_password).await?;

        info!(user_id = user_id, "Password changed");
        Ok(())
    }

    /// Reset a password through the out-of-band recovery path.
    ///
    /// Gated by the server-side reset secret; does not require the old
    /// password or any session.
    pub async fn reset_password(
        &self,
        username: &str,
        secret_key: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        match self.reset_secret.as_deref() {
            Some(secret) if secret == secret_key => {}
            Some(_) => {
                warn!(username = %username, "Password reset refused: bad secret");
                return Err(AccountError::Forbidden);
            }
            None => {
                warn!("Password reset refused: no reset secret configured");
                return Err(AccountError::Forbidden);
            }
        }

        let repo = UserRepository::new(self.db.pool());
        let user = repo
            .get_by_username(username)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        self.store_new_password(&user, new_password).await?;

        info!(username = %username, user_id = user.id, "Password reset");
        Ok(())
    }

    /// Validate, hash, and persist a new password for a user.
    async fn store_new_password(&self, user: &User, new_password: &str) -> Result<(), AccountError> {
        policy::validate_password(new_password)?;

        let password_hash = Self::hash_offloaded(new_password.to_string()).await?;

        let repo = UserRepository::new(self.db.pool());
        if !repo.update_password(user.id, &password_hash).await? {
            return Err(AccountError::UserNotFound);
        }
        Ok(())
    }
}
