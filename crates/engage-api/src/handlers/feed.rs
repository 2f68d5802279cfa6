//! Trending feed handler

use axum::{
    extract::{Query, State},
    Json,
};
use engage_service::dto::TrendingPage;
use engage_service::TrendingService;
use serde::Deserialize;

use crate::extractors::{Identity, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Trending query parameters beyond pagination
#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub hours: Option<u32>,
}

/// Trending feed
///
/// GET /feed/trending?hours&page&size
pub async fn trending(
    State(state): State<AppState>,
    _identity: Identity,
    pagination: Pagination,
    Query(params): Query<TrendingParams>,
) -> ApiResult<Json<TrendingPage>> {
    let service = TrendingService::new(state.service_context());
    let page = service
        .rank(params.hours, pagination.page, pagination.size)
        .await?;
    Ok(Json(page))
}
