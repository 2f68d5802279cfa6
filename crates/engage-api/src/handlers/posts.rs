//! Post action handlers
//!
//! Post creation with fan-out, likes, comments, and counter repair.

use axum::{
    extract::{Path, State},
    Json,
};
use engage_core::entities::PostCounters;
use engage_core::Snowflake;
use engage_service::dto::{CommentResponse, CreateCommentRequest, CreatePostRequest, PostResponse};
use engage_service::{CounterService, FanOutReport, SocialService};
use serde::Serialize;

use crate::extractors::{Identity, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Response for post creation: the post plus its delivery report
#[derive(Debug, Serialize)]
pub struct CreatePostBody {
    pub post: PostResponse,
    pub delivery: FanOutReport,
}

fn parse_post_id(raw: &str) -> ApiResult<Snowflake> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid post id format"))
}

/// Create a post and fan it out to followers
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    identity: Identity,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<CreatePostBody>>> {
    let service = SocialService::new(state.service_context());
    let (post, delivery) = service.create_post(identity.user_id, &request.content).await?;
    Ok(Created(Json(CreatePostBody {
        post: PostResponse::from(&post),
        delivery,
    })))
}

/// Like a post
///
/// POST /posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    identity: Identity,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostCounters>> {
    let post_id = parse_post_id(&post_id)?;
    let service = SocialService::new(state.service_context());
    let counters = service.like_post(identity.user_id, post_id).await?;
    Ok(Json(counters))
}

/// Remove a like
///
/// DELETE /posts/{id}/like
pub async fn unlike_post(
    State(state): State<AppState>,
    identity: Identity,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostCounters>> {
    let post_id = parse_post_id(&post_id)?;
    let service = SocialService::new(state.service_context());
    let counters = service.unlike_post(identity.user_id, post_id).await?;
    Ok(Json(counters))
}

/// Comment on a post
///
/// POST /posts/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    identity: Identity,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = parse_post_id(&post_id)?;
    let service = SocialService::new(state.service_context());
    let comment = service
        .comment_on_post(identity.user_id, post_id, &request.content)
        .await?;
    Ok(Created(Json(CommentResponse::from(&comment))))
}

/// Recount a post's counters from source rows
///
/// POST /posts/{id}/resync
pub async fn resync_post(
    State(state): State<AppState>,
    _identity: Identity,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostCounters>> {
    let post_id = parse_post_id(&post_id)?;
    let service = CounterService::new(state.service_context());
    let counters = service.resync_post_counters(post_id).await?;
    Ok(Json(counters))
}
