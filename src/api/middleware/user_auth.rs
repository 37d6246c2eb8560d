//! Bearer token authentication

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::JwtClaims;
use crate::infrastructure::observability::record_token_validation;

/// Extractor that requires a valid bearer token and yields its claims
///
/// The token is read from the `Authorization: Bearer <token>` header.
/// The identity is not re-checked against the store here, so a token issued
/// before deactivation is still accepted until it expires.
#[derive(Debug, Clone)]
pub struct RequireClaims(pub JwtClaims);

impl FromRequestParts<AppState> for RequireClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state.token_authority.validate(&token).map_err(|e| {
            record_token_validation(false);
            ApiError::from(e)
        })?;

        record_token_validation(true);
        debug!(sub = %claims.sub, "Bearer token accepted");

        Ok(RequireClaims(claims))
    }
}

/// Extract the token from an `Authorization: Bearer` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match token {
        Some(token) => Ok(token.to_string()),
        None => Err(ApiError::unauthorized(
            "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
        )),
    }
}
