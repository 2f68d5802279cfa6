//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Notification Responses
// ============================================================================

/// Sender display info attached to a notification item
#[derive(Debug, Clone, Serialize)]
pub struct SenderInfo {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Single notification item
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderInfo>,
    pub kind: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// One page of a recipient's notifications
#[derive(Debug, Serialize)]
pub struct NotificationPage {
    pub notifications: Vec<NotificationResponse>,
    pub total: u64,
    pub unread_count: u64,
    pub page: u32,
    pub has_next: bool,
}

/// Notification inbox statistics
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NotificationStats {
    pub total: u64,
    pub unread: u64,
    /// Created within the last 24 hours
    pub recent: u64,
}

// ============================================================================
// Post / Trending Responses
// ============================================================================

/// Post response
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Post with its trending score
#[derive(Debug, Clone, Serialize)]
pub struct TrendingPostResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub score: f64,
    /// Display flag only; nothing is persisted
    pub trending: bool,
}

/// One page of the trending feed
#[derive(Debug, Serialize)]
pub struct TrendingPage {
    pub posts: Vec<TrendingPostResponse>,
    pub total: u64,
    pub page: u32,
    pub has_next: bool,
    pub window_hours: u32,
}
