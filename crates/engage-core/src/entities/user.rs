//! User entity - referenced by the engine, owned by the account system
//!
//! The engine never creates accounts; it only reads users and rewrites
//! their denormalized counters. Those counters are derived values and
//! this engine is their sole legitimate writer.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub followers_count: i64,
    pub following_count: i64,
    pub posts_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active User with zeroed counters
    pub fn new(id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            full_name: None,
            is_active: true,
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name: full name when present, username otherwise
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }

    /// Counters as read by callers. Stored values can go stale between
    /// resyncs but a negative count is never surfaced.
    pub fn counters(&self) -> UserCounters {
        UserCounters {
            followers: self.followers_count.max(0),
            following: self.following_count.max(0),
            posts: self.posts_count.max(0),
        }
    }

    /// Deactivate the user (soft delete)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Snapshot of a user's denormalized counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct UserCounters {
    pub followers: i64,
    pub following: i64,
    pub posts: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(Snowflake::new(1), "alice".to_string());
        assert!(user.is_active);
        assert_eq!(user.counters(), UserCounters::default());
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let mut user = User::new(Snowflake::new(1), "alice".to_string());
        assert_eq!(user.display_name(), "alice");

        user.full_name = Some("Alice Kim".to_string());
        assert_eq!(user.display_name(), "Alice Kim");
    }

    #[test]
    fn test_counters_clamp_negative_to_zero() {
        let mut user = User::new(Snowflake::new(1), "alice".to_string());
        user.followers_count = -3;
        user.posts_count = 7;

        let counters = user.counters();
        assert_eq!(counters.followers, 0);
        assert_eq!(counters.posts, 7);
    }

    #[test]
    fn test_deactivate() {
        let mut user = User::new(Snowflake::new(1), "alice".to_string());
        user.deactivate();
        assert!(!user.is_active);
    }
}
