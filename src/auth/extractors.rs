use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{repo_types::User, services::authenticate};
use crate::{error::AppError, state::AppState};

/// Raw bearer token from the `Authorization` header, not yet verified.
///
/// Handlers that validate a body take this instead of [`AuthUser`] so that
/// a malformed body is rejected before the token is looked at.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

fn bearer_from_header(value: &str) -> Option<String> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_from_header);
        Ok(BearerToken(token))
    }
}

/// Verifies the bearer token and loads the user it names.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = match BearerToken::from_request_parts(parts, state).await {
            Ok(token) => token,
            Err(never) => match never {},
        };
        let user = authenticate(state, token.as_deref()).await?;
        Ok(AuthUser(user))
    }
}
