//! User relationship handlers
//!
//! Follow edges and user counter repair.

use axum::{
    extract::{Path, State},
    Json,
};
use engage_core::entities::UserCounters;
use engage_core::Snowflake;
use engage_service::{CounterService, SocialService};

use crate::extractors::Identity;
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

fn parse_user_id(raw: &str) -> ApiResult<Snowflake> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid user id format"))
}

/// Follow a user
///
/// POST /users/{id}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    identity: Identity,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let following_id = parse_user_id(&user_id)?;
    let service = SocialService::new(state.service_context());
    service.follow_user(identity.user_id, following_id).await?;
    Ok(NoContent)
}

/// Unfollow a user
///
/// DELETE /users/{id}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    identity: Identity,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let following_id = parse_user_id(&user_id)?;
    let service = SocialService::new(state.service_context());
    service.unfollow_user(identity.user_id, following_id).await?;
    Ok(NoContent)
}

/// Recount a user's counters from source rows
///
/// POST /users/{id}/resync
pub async fn resync_user(
    State(state): State<AppState>,
    _identity: Identity,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserCounters>> {
    let user_id = parse_user_id(&user_id)?;
    let service = CounterService::new(state.service_context());
    let counters = service.resync_user_counters(user_id).await?;
    Ok(Json(counters))
}
