//! Request-body validation for the Web API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::{async_trait, Json};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::web::error::ApiError;

/// JSON extractor that runs `validator` rules after deserializing.
///
/// A malformed body becomes a 400; a body that fails a rule becomes a
/// 422 carrying the first failing rule's message.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(format!("Invalid JSON: {rejection}")))?;

        payload
            .validate()
            .map_err(ApiError::from_validation_errors)?;

        Ok(Self(payload))
    }
}

/// Reject strings carrying control characters, except common whitespace.
pub fn no_control_chars(value: &str) -> Result<(), ValidationError> {
    let clean = value
        .chars()
        .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'));

    if clean {
        Ok(())
    } else {
        Err(ValidationError::new("control_chars")
            .with_message("Must not contain control characters".into()))
    }
}
