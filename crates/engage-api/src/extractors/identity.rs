//! Identity extractor
//!
//! The upstream gateway authenticates callers and forwards the user ID in
//! the `X-User-Id` header. This extractor only parses it; a missing or
//! malformed header is a 401.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use engage_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the gateway-authenticated user ID
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity extracted from the `X-User-Id` header
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Snowflake,
}

impl Identity {
    /// Create a new Identity
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(ApiError::MissingIdentity)?
            .to_str()
            .map_err(|_| ApiError::InvalidIdentity)?;

        let user_id = raw.parse::<Snowflake>().map_err(|e| {
            tracing::warn!(error = %e, "Invalid X-User-Id header");
            ApiError::InvalidIdentity
        })?;

        Ok(Identity::new(user_id))
    }
}
