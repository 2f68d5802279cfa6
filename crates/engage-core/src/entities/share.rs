//! Share edge - counted toward a post's shares_count

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Share of a post by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Create a new Share
    pub fn new(post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
