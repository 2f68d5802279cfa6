//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 500, message = "Post content must be 1-500 characters"))]
    pub content: String,
}

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 300, message = "Comment must be 1-300 characters"))]
    pub content: String,
}

/// Bulk system notification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SystemNotificationRequest {
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub recipient_ids: Vec<String>,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub message: String,

    pub data: Option<serde_json::Value>,
}
