//! Data transfer objects

mod mappers;
mod requests;
mod responses;

pub use requests::{CreateCommentRequest, CreatePostRequest, SystemNotificationRequest};
pub use responses::{
    CommentResponse, NotificationPage, NotificationResponse, NotificationStats, PostResponse,
    SenderInfo, TrendingPage, TrendingPostResponse,
};
