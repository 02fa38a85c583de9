//! Bearer-token authentication middleware.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{Claims, TokenError, TokenIssuer};
use crate::web::error::ApiError;

/// Extractor for authenticated users.
///
/// Use this extractor to require authentication for a handler. A
/// missing `Authorization: Bearer <token>` header yields 401; a token
/// that fails verification yields 403. On success the handler receives
/// the decoded claims. The store is never touched.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(TokenError::MissingToken)
            .map_err(ApiError::from)?;

        let tokens = parts
            .extensions
            .get::<Arc<TokenIssuer>>()
            .ok_or_else(|| ApiError::internal("Token verifier not configured"))?;

        let claims = tokens.verify(token).map_err(ApiError::from)?;

        Ok(AuthUser(claims))
    }
}

/// Middleware function to inject the token issuer into request extensions.
pub async fn inject_token_issuer(
    tokens: Arc<TokenIssuer>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}
