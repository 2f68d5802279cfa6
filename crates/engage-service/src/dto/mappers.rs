//! Entity -> response DTO conversions

use engage_core::entities::{Comment, Notification, Post, User};

use super::responses::{
    CommentResponse, NotificationResponse, PostResponse, SenderInfo, TrendingPostResponse,
};

impl SenderInfo {
    /// Build sender display info from a user row
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

impl NotificationResponse {
    /// Convert a notification plus its resolved sender into a response.
    /// `sender` is None for system notifications and for senders that no
    /// longer exist.
    pub fn from_entity(notification: &Notification, sender: Option<SenderInfo>) -> Self {
        Self {
            id: notification.id.to_string(),
            sender,
            kind: notification.kind.as_str().to_string(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            data: notification.data.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        let counters = post.counters();
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content.clone(),
            likes_count: counters.likes,
            comments_count: counters.comments,
            shares_count: counters.shares,
            created_at: post.created_at,
        }
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}

impl TrendingPostResponse {
    /// Pair a post with the score computed for it
    pub fn from_scored(post: &Post, score: f64) -> Self {
        Self {
            post: PostResponse::from(post),
            score,
            trending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_core::{NotificationKind, Snowflake};
    use serde_json::json;

    #[test]
    fn test_notification_response_serializes_id_as_string() {
        let notification = Notification::new(
            Snowflake::new(42),
            Snowflake::new(1),
            Some(Snowflake::new(2)),
            NotificationKind::Like,
            "New Like".to_string(),
            "bob liked your post".to_string(),
            Some(json!({"postId": "7"})),
        );
        let response = NotificationResponse::from_entity(&notification, None);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["id"], json!("42"));
        assert_eq!(value["kind"], json!("like"));
        assert!(value.get("sender").is_none());
    }

    #[test]
    fn test_post_response_clamps_negative_counters() {
        let mut post = Post::new(Snowflake::new(1), Snowflake::new(2), "hi".to_string());
        post.likes_count = -5;
        let response = PostResponse::from(&post);
        assert_eq!(response.likes_count, 0);
    }
}
