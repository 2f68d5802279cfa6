//! Notification handlers
//!
//! Inbox listing, read state, stats, and cleanup endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use engage_core::entities::NotificationKind;
use engage_core::traits::NotificationQuery;
use engage_core::Snowflake;
use engage_service::dto::{NotificationPage, NotificationStats, SystemNotificationRequest};
use engage_service::{NotificationService, ServiceError};
use serde::{Deserialize, Serialize};

use crate::extractors::{Identity, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Filter query parameters for notification listing
#[derive(Debug, Deserialize)]
pub struct ListFilter {
    #[serde(default)]
    pub unread_only: bool,
    pub kind: Option<String>,
    pub sender_id: Option<String>,
}

/// Cleanup query parameters
#[derive(Debug, Deserialize)]
pub struct CleanupParams {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedBody {
    pub updated: u64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountBody {
    pub unread_count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct BroadcastBody {
    pub created: u64,
    pub skipped: u64,
}

fn build_query(filter: ListFilter) -> ApiResult<NotificationQuery> {
    let kind = filter
        .kind
        .map(|s| {
            NotificationKind::parse(&s)
                .ok_or_else(|| ApiError::invalid_query(format!("Unknown notification kind: {s}")))
        })
        .transpose()?;
    let sender_id = filter
        .sender_id
        .map(|s| {
            s.parse::<Snowflake>()
                .map_err(|_| ApiError::invalid_query("Invalid sender_id format"))
        })
        .transpose()?;

    Ok(NotificationQuery {
        unread_only: filter.unread_only,
        kind,
        sender_id,
        ..NotificationQuery::default()
    })
}

/// List notifications
///
/// GET /notifications?page&size&unread_only&kind&sender_id
pub async fn list_notifications(
    State(state): State<AppState>,
    identity: Identity,
    pagination: Pagination,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<NotificationPage>> {
    let query = build_query(filter)?;
    let service = NotificationService::new(state.service_context());
    let page = service
        .list(identity.user_id, pagination.page, pagination.size, &query)
        .await?;
    Ok(Json(page))
}

/// Mark one notification read
///
/// PUT /notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<NoContent> {
    let id: Snowflake = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid notification id format"))?;

    let service = NotificationService::new(state.service_context());
    let marked = service.mark_read(id, identity.user_id).await?;
    if !marked {
        return Err(ServiceError::not_found("Notification", id.to_string()).into());
    }
    Ok(NoContent)
}

/// Mark every unread notification read
///
/// PUT /notifications/mark-all-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<UpdatedBody>> {
    let service = NotificationService::new(state.service_context());
    let updated = service.mark_all_read(identity.user_id).await?;
    Ok(Json(UpdatedBody { updated }))
}

/// Unread count
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<UnreadCountBody>> {
    let service = NotificationService::new(state.service_context());
    let unread_count = service.unread_count(identity.user_id).await?;
    Ok(Json(UnreadCountBody { unread_count }))
}

/// Inbox statistics
///
/// GET /notifications/stats
pub async fn stats(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<NotificationStats>> {
    let service = NotificationService::new(state.service_context());
    let stats = service.stats(identity.user_id).await?;
    Ok(Json(stats))
}

/// Delete one notification
///
/// DELETE /notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<NoContent> {
    let id: Snowflake = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid notification id format"))?;

    let service = NotificationService::new(state.service_context());
    let deleted = service.delete(id, identity.user_id).await?;
    if !deleted {
        return Err(ServiceError::not_found("Notification", id.to_string()).into());
    }
    Ok(NoContent)
}

/// Send a system notification to a set of recipients
///
/// POST /notifications/system
pub async fn system_notification(
    State(state): State<AppState>,
    _identity: Identity,
    ValidatedJson(request): ValidatedJson<SystemNotificationRequest>,
) -> ApiResult<Created<Json<BroadcastBody>>> {
    let mut recipients = Vec::with_capacity(request.recipient_ids.len());
    for raw in &request.recipient_ids {
        let id = raw
            .parse::<Snowflake>()
            .map_err(|_| ApiError::invalid_query(format!("Invalid recipient id: {raw}")))?;
        recipients.push(id);
    }

    let service = NotificationService::new(state.service_context());
    let (created, skipped) = service
        .notify_system(&recipients, &request.title, &request.message, request.data)
        .await?;
    Ok(Created(Json(BroadcastBody { created, skipped })))
}

/// Age-based cleanup (retention floor applies)
///
/// DELETE /notifications/cleanup?days=N
pub async fn cleanup(
    State(state): State<AppState>,
    _identity: Identity,
    Query(params): Query<CleanupParams>,
) -> ApiResult<Json<DeletedBody>> {
    let days = params.days.unwrap_or(30);
    let service = NotificationService::new(state.service_context());
    let deleted = service.delete_old(days).await?;
    Ok(Json(DeletedBody { deleted }))
}
