//! Post entity - referenced content with derived engagement counters

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum characters kept in a notification payload preview
const PREVIEW_LEN: usize = 50;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post with zeroed counters
    pub fn new(id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            author_id,
            content,
            likes_count: 0,
            comments_count: 0,
            shares_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Truncated content for notification payloads: first 50 chars,
    /// with an ellipsis when anything was cut
    pub fn preview(&self) -> String {
        preview_of(&self.content, PREVIEW_LEN)
    }

    /// Counters as read by callers, clamped so a negative stored value
    /// is never surfaced
    pub fn counters(&self) -> PostCounters {
        PostCounters {
            likes: self.likes_count.max(0),
            comments: self.comments_count.max(0),
            shares: self.shares_count.max(0),
        }
    }

    /// A post with any nonzero engagement counter
    #[inline]
    pub fn has_engagement(&self) -> bool {
        self.likes_count > 0 || self.comments_count > 0 || self.shares_count > 0
    }
}

/// Truncate at a char boundary at or below `max_len` bytes
pub(crate) fn preview_of(content: &str, max_len: usize) -> String {
    if content.len() <= max_len {
        return content.to_string();
    }
    let mut end = max_len;
    while !content.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &content[..end])
}

/// Snapshot of a post's denormalized counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct PostCounters {
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}
