//! Database models - SQLx row types

mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod share;
mod user;

pub use comment::CommentModel;
pub use follow::FollowModel;
pub use like::LikeModel;
pub use notification::NotificationModel;
pub use post::PostModel;
pub use share::ShareModel;
pub use user::UserModel;
