//! Like edge - unique (post, user) pair, hard-deleted on unlike

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Like relationship between a user and a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Create a new Like
    pub fn new(post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
