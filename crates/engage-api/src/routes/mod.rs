//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{feed, health, notifications, posts, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate
/// middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(notification_routes())
        .merge(feed_routes())
        .merge(post_routes())
        .merge(user_routes())
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/:id/read", put(notifications::mark_read))
        .route("/notifications/mark-all-read", put(notifications::mark_all_read))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/stats", get(notifications::stats))
        .route("/notifications/:id", delete(notifications::delete_notification))
        .route("/notifications/cleanup", delete(notifications::cleanup))
        .route("/notifications/system", post(notifications::system_notification))
}

/// Feed routes
fn feed_routes() -> Router<AppState> {
    Router::new().route("/feed/trending", get(feed::trending))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route(
            "/posts/:id/like",
            post(posts::like_post).delete(posts::unlike_post),
        )
        .route("/posts/:id/comments", post(posts::create_comment))
        .route("/posts/:id/resync", post(posts::resync_post))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:id/follow",
            post(users::follow_user).delete(users::unfollow_user),
        )
        .route("/users/:id/resync", post(users::resync_user))
}
