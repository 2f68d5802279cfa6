//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Follow relationship not found")]
    FollowNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the notification recipient")]
    NotNotificationRecipient,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already following this user")]
    AlreadyFollowing,

    #[error("Already liked this post")]
    AlreadyLiked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a validation failure with a message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::FollowNotFound => "UNKNOWN_FOLLOW",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotNotificationRecipient => "NOT_NOTIFICATION_RECIPIENT",

            // Conflict
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::AlreadyLiked => "ALREADY_LIKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::FollowNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::ContentTooLong { .. })
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotNotificationRecipient)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyFollowing | Self::AlreadyLiked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::validation("bad input");
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::FollowNotFound.is_not_found());
        assert!(!DomainError::AlreadyFollowing.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::validation("x").is_validation());
        assert!(DomainError::ContentTooLong { max: 500 }.is_validation());
        assert!(!DomainError::AlreadyLiked.is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UserNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "User not found: 123");

        let err = DomainError::ContentTooLong { max: 500 };
        assert_eq!(err.to_string(), "Content too long: max 500 characters");
    }
}
