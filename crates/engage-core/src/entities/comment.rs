//! Comment entity

use chrono::{DateTime, Utc};

use crate::entities::post::preview_of;
use crate::value_objects::Snowflake;

/// Comment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Truncated content for notification payloads
    pub fn preview(&self) -> String {
        preview_of(&self.content, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_preview() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "a".repeat(60),
        );
        assert!(comment.preview().ends_with("..."));
        assert_eq!(comment.preview().len(), 53);
    }
}
