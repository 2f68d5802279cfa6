//! Domain traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, FollowRepository, LikeRepository, NotificationQuery,
    NotificationRepository, PostRepository, RepoResult, ShareRepository, UserRepository,
};
