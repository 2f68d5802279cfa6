//! Follow edge - unique (follower, following) pair

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Follow relationship between two users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: Snowflake,
    pub following_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a new Follow edge, rejecting self-follow
    pub fn new(follower_id: Snowflake, following_id: Snowflake) -> Result<Self, DomainError> {
        if follower_id == following_id {
            return Err(DomainError::validation("cannot follow yourself"));
        }
        Ok(Self {
            follower_id,
            following_id,
            created_at: Utc::now(),
        })
    }
}
