//! Password policy engine for taskdeck.
//!
//! Pure validation of proposed passwords against the strength rules.
//! Checks run in order and the first failure wins.

use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Special characters accepted by the policy.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Password policy violations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// Password is shorter than the minimum length.
    #[error("too short")]
    TooShort,

    /// Password has no uppercase letter.
    #[error("missing uppercase")]
    MissingUppercase,

    /// Password has no lowercase letter.
    #[error("missing lowercase")]
    MissingLowercase,

    /// Password has no digit.
    #[error("missing digit")]
    MissingDigit,

    /// Password has no special character.
    #[error("missing special character")]
    MissingSpecial,
}

/// Validate a proposed password against the policy.
///
/// Rules, in order (first failure wins):
/// 1. at least [`MIN_PASSWORD_LENGTH`] characters
/// 2. at least one uppercase letter
/// 3. at least one lowercase letter
/// 4. at least one digit
/// 5. at least one character from [`SPECIAL_CHARS`]
///
/// No maximum length is enforced here.
pub fn validate_password(password: &str) -> Result<(), PolicyError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PolicyError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PolicyError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PolicyError::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(PolicyError::MissingSpecial);
    }
    Ok(())
}
