//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
}
