//! Error types for taskdeck.

use thiserror::Error;

/// Common error type for taskdeck.
#[derive(Error, Debug)]
pub enum TaskdeckError {
    /// Database error, wrapping whatever sqlx reported.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for TaskdeckError {
    fn from(e: sqlx::Error) -> Self {
        TaskdeckError::Database(e.to_string())
    }
}

/// Result type alias for taskdeck operations.
pub type Result<T> = std::result::Result<T, TaskdeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = TaskdeckError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_config_display() {
        let err = TaskdeckError::Config("jwt_secret is not set".to_string());
        assert!(err.to_string().starts_with("configuration error:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TaskdeckError = io_err.into();
        assert!(matches!(err, TaskdeckError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: TaskdeckError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, TaskdeckError::Database(_)));
    }
}
