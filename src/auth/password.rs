//! Credential hashing.
//!
//! Argon2id with a fresh random salt per hash. The output is a PHC
//! string carrying the algorithm, cost parameters, salt, and digest,
//! so hashes minted under older costs keep verifying after the
//! defaults move.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::OsRng;
use thiserror::Error;

/// Argon2 memory cost in KiB (64 MB).
const MEMORY_KIB: u32 = 65536;
/// Argon2 iteration count.
const ITERATIONS: u32 = 3;
/// Argon2 lane count.
const LANES: u32 = 4;

/// Password hashing errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Hashing itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The stored hash is not a valid PHC string.
    #[error("invalid password hash format")]
    MalformedHash,

    /// The password does not match the hash.
    #[error("password verification failed")]
    Mismatch,
}

fn hasher() -> Argon2<'static> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, None).expect("valid Argon2 params");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Hash a password with Argon2id.
///
/// Hashing the same password twice yields different strings; only
/// [`verify_password`] can relate a password to its hash.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a password against a stored hash.
///
/// Cost parameters are read from the hash itself, not from the
/// current defaults, and the digest comparison inside the argon2
/// crate is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_formatted() {
        let hash = hash_password("a sufficiently long password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hashing_is_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same password", &first).is_ok());
        assert!(verify_password("same password", &second).is_ok());
    }

    #[test]
    fn test_wrong_password_is_mismatch() {
        let hash = hash_password("the real password").unwrap();
        assert!(matches!(
            verify_password("not the password", &hash),
            Err(PasswordError::Mismatch)
        ));
    }

    #[test]
    fn test_garbage_hash_is_malformed() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(PasswordError::MalformedHash)
        ));
    }

    #[test]
    fn test_verification_honors_parameters_in_hash() {
        // A hash minted under cheaper costs still verifies: the
        // parameters ride along in the PHC string.
        let params = Params::new(8, 1, 1, None).unwrap();
        let cheap = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = cheap
            .hash_password("legacy password".as_bytes(), &salt)
            .unwrap()
            .to_string();

        assert!(verify_password("legacy password", &hash).is_ok());
        assert!(matches!(
            verify_password("other password", &hash),
            Err(PasswordError::Mismatch)
        ));
    }

    #[test]
    fn test_unicode_passwords_round_trip() {
        let hash = hash_password("pässwörd123!").unwrap();
        assert!(verify_password("pässwörd123!", &hash).is_ok());
    }
}
