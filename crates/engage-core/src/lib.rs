//! # engage-core
//!
//! Domain layer for the engagement engine: entities, value objects,
//! repository traits, and domain errors. This crate has zero dependencies
//! on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Follow, Like, Notification, NotificationKind, Post, PostCounters, Share,
    TrendingScore, User, UserCounters,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, FollowRepository, LikeRepository, NotificationQuery,
    NotificationRepository, PostRepository, RepoResult, ShareRepository, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
