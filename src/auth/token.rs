//! Session tokens for taskdeck.
//!
//! Signed, self-contained bearer tokens. The server keeps no session
//! record: possession of a valid token is authentication. Tokens expire
//! naturally and cannot be revoked early.
//!
//! Claims parsing is kept behind [`TokenIssuer`] so the signing scheme
//! can change without touching callers.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default token lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL_DAYS: u64 = 7;

/// Token errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// No token was presented.
    #[error("missing token")]
    MissingToken,

    /// Token is malformed, has a bad signature, or has expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("token signing failed: {0}")]
    Issue(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i64,
    /// Username.
    pub username: String,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// Token ID (unique per issuance).
    pub jti: String,
}

/// Issues and verifies session tokens with a process-wide secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer from a secret key with the default lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(
            secret,
            Duration::from_secs(DEFAULT_TOKEN_TTL_DAYS * 24 * 60 * 60),
        )
    }

    /// Create a new issuer with a custom token lifetime.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for a user.
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with [`TokenError::InvalidToken`] when the signature does
    /// not match or the token has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token validation failed: {}", e);
                TokenError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let issuer = TokenIssuer::new("test-secret");

        let token = issuer.issue(42, "alice").unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_tokens_carry_unique_ids() {
        let issuer = TokenIssuer::new("test-secret");

        let a = issuer.verify(&issuer.issue(1, "alice").unwrap()).unwrap();
        let b = issuer.verify(&issuer.issue(1, "alice").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test-secret";
        let issuer = TokenIssuer::new(secret);

        let now = chrono::Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: 1,
            username: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600, // Expired 1 hour ago
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode_raw(secret, &claims);
        assert!(matches!(
            issuer.verify(&token),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenIssuer::new("secret1").issue(1, "alice").unwrap();
        let other = TokenIssuer::new("secret2");

        assert!(matches!(other.verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = TokenIssuer::new("test-secret");
        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(TokenError::InvalidToken)
        ));
        assert!(matches!(issuer.verify(""), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_custom_ttl() {
        let issuer = TokenIssuer::with_ttl("test-secret", Duration::from_secs(3600));
        let token = issuer.issue(1, "alice").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}
