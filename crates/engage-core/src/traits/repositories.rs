//! Repository traits (ports) - define the interface for data access
//!
//! The engine owns no storage of its own; every read and write goes through
//! these traits. The infrastructure layer provides the implementations
//! (PostgreSQL in production, in-memory for tests and local development).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, Follow, Like, Notification, NotificationKind, Post, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by ID, returning None when the account is inactive
    async fn find_active_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Rewrite the denormalized counters in one call
    async fn update_counters(
        &self,
        user_id: Snowflake,
        followers: i64,
        following: i64,
        posts: i64,
    ) -> RepoResult<()>;

    /// Activate or deactivate an account
    async fn set_active(&self, user_id: Snowflake, active: bool) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Find a follow edge
    async fn find(
        &self,
        follower_id: Snowflake,
        following_id: Snowflake,
    ) -> RepoResult<Option<Follow>>;

    /// Insert a follow edge. Idempotent: returns false when the edge
    /// already existed.
    async fn create(&self, follow: &Follow) -> RepoResult<bool>;

    /// Delete a follow edge. Returns false when there was nothing to delete.
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool>;

    /// Count users following `user_id`
    async fn count_followers(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Count users `user_id` follows
    async fn count_following(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// IDs of everyone following `user_id` (fan-out read path)
    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Rewrite the denormalized counters in one call
    async fn update_counters(
        &self,
        post_id: Snowflake,
        likes: i64,
        comments: i64,
        shares: i64,
    ) -> RepoResult<()>;

    /// Count posts authored by `user_id`
    async fn count_by_author(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Posts created at or after `cutoff` with at least one nonzero
    /// engagement counter (trending candidate read path)
    async fn find_engaged_since(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Post>>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Find a like edge
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Like>>;

    /// Insert a like. Idempotent: returns false when it already existed.
    async fn create(&self, like: &Like) -> RepoResult<bool>;

    /// Delete a like. Returns false when there was nothing to delete.
    async fn delete(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Count likes on a post
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment. Returns false when it did not exist.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Count comments on a post
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Share Repository
// ============================================================================

#[async_trait]
pub trait ShareRepository: Send + Sync {
    /// Insert a share. Idempotent: returns false when it already existed.
    async fn create(&self, share: &crate::entities::Share) -> RepoResult<bool>;

    /// Count shares of a post
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Filter for notification listing and counting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQuery {
    pub unread_only: bool,
    pub kind: Option<NotificationKind>,
    pub sender_id: Option<Snowflake>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl NotificationQuery {
    /// Filter that keeps only unread rows
    pub fn unread() -> Self {
        Self {
            unread_only: true,
            ..Self::default()
        }
    }

    /// Whether a notification passes this filter
    pub fn matches(&self, n: &Notification) -> bool {
        if self.unread_only && n.is_read {
            return false;
        }
        if let Some(kind) = self.kind {
            if n.kind != kind {
                return false;
            }
        }
        if let Some(sender_id) = self.sender_id {
            if n.sender_id != Some(sender_id) {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if n.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if n.created_at > to {
                return false;
            }
        }
        true
    }
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// Insert a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Newest `(recipient, sender, kind)` row created at or after `cutoff`,
    /// if any (dedup read path)
    async fn find_recent_duplicate(
        &self,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        kind: NotificationKind,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<Option<Notification>>;

    /// One page for a recipient ordered `created_at DESC, id DESC`, plus
    /// the total row count under the same filter. `page` is 1-indexed.
    async fn find_page_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
        page: u32,
        page_size: u32,
    ) -> RepoResult<(Vec<Notification>, u64)>;

    /// Count a recipient's notifications under a filter
    async fn count_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
    ) -> RepoResult<u64>;

    /// Count a recipient's unread notifications
    async fn count_unread(&self, recipient_id: Snowflake) -> RepoResult<u64>;

    /// Count a recipient's notifications created at or after `cutoff`
    async fn count_since(&self, recipient_id: Snowflake, cutoff: DateTime<Utc>) -> RepoResult<u64>;

    /// Mark one notification read, ownership-checked. Returns true when the
    /// row exists and belongs to the recipient, whether or not it was
    /// already read.
    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool>;

    /// Mark everything unread as read; returns the number of rows updated
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64>;

    /// Delete one notification, ownership-checked. Returns false when the
    /// row does not exist or belongs to someone else.
    async fn delete(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool>;

    /// Delete all notifications created strictly before `cutoff`; returns
    /// the number of rows deleted
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(kind: NotificationKind, read: bool) -> Notification {
        let mut n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Some(Snowflake::new(20)),
            kind,
            "t".to_string(),
            "m".to_string(),
            Some(json!({"postId": "5"})),
        );
        if read {
            n.mark_read();
        }
        n
    }

    #[test]
    fn test_query_default_matches_everything() {
        let q = NotificationQuery::default();
        assert!(q.matches(&notification(NotificationKind::Like, false)));
        assert!(q.matches(&notification(NotificationKind::System, true)));
    }

    #[test]
    fn test_query_unread_only() {
        let q = NotificationQuery::unread();
        assert!(q.matches(&notification(NotificationKind::Like, false)));
        assert!(!q.matches(&notification(NotificationKind::Like, true)));
    }

    #[test]
    fn test_query_kind_filter() {
        let q = NotificationQuery {
            kind: Some(NotificationKind::Follow),
            ..Default::default()
        };
        assert!(!q.matches(&notification(NotificationKind::Like, false)));
    }

    #[test]
    fn test_query_sender_filter() {
        let q = NotificationQuery {
            sender_id: Some(Snowflake::new(99)),
            ..Default::default()
        };
        assert!(!q.matches(&notification(NotificationKind::Like, false)));
    }
}
