//! Request identity extraction

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use bizkit_domain::OwnerIdentity;

use crate::context::AppContext;
use crate::errors::ApiError;

/// Header the original web client sends its token in.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// The authenticated owner of the current request
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerIdentity);

impl FromRequestParts<Arc<AppContext>> for Owner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);
        let identity = state.identity.identify(token).await?;
        Ok(Owner(identity))
    }
}

/// Token from `x-auth-token`, falling back to `Authorization: Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = header_str(headers, AUTH_TOKEN_HEADER) {
        return Some(token);
    }

    header_str(headers, AUTHORIZATION.as_str()).and_then(|value| {
        let (scheme, token) = value.split_once(' ')?;
        scheme.eq_ignore_ascii_case("bearer").then(|| token.trim()).filter(|t| !t.is_empty())
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim).filter(|v| !v.is_empty())
}
