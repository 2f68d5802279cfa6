//! Trending score - transient ranking value, never persisted

use crate::value_objects::Snowflake;

/// Computed trending score for a post at a particular instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingScore {
    pub post_id: Snowflake,
    pub score: f64,
}

impl TrendingScore {
    pub fn new(post_id: Snowflake, score: f64) -> Self {
        Self { post_id, score }
    }
}
