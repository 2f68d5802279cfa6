//! Shared fixtures for service tests

use std::sync::Arc;

use engage_common::EngineConfig;
use engage_core::entities::{Post, User};
use engage_core::{Snowflake, SnowflakeGenerator};
use engage_db::{
    MemCommentRepository, MemFollowRepository, MemLikeRepository, MemNotificationRepository,
    MemPostRepository, MemShareRepository, MemUserRepository,
};

use super::context::{ServiceContext, ServiceContextBuilder};

/// Context wired to fresh in-memory repositories
pub(crate) fn mem_context() -> ServiceContext {
    ServiceContextBuilder::new()
        .user_repo(Arc::new(MemUserRepository::new()))
        .follow_repo(Arc::new(MemFollowRepository::new()))
        .post_repo(Arc::new(MemPostRepository::new()))
        .like_repo(Arc::new(MemLikeRepository::new()))
        .comment_repo(Arc::new(MemCommentRepository::new()))
        .share_repo(Arc::new(MemShareRepository::new()))
        .notification_repo(Arc::new(MemNotificationRepository::new()))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(0)))
        .engine(EngineConfig::default())
        .build()
        .unwrap()
}

/// Seed an active user
pub(crate) async fn seed_user(ctx: &ServiceContext, id: i64, username: &str) -> User {
    let user = User::new(Snowflake::new(id), username.to_string());
    ctx.user_repo().create(&user).await.unwrap();
    user
}

/// Seed a post
pub(crate) async fn seed_post(ctx: &ServiceContext, id: i64, author_id: i64, content: &str) -> Post {
    let post = Post::new(Snowflake::new(id), Snowflake::new(author_id), content.to_string());
    ctx.post_repo().create(&post).await.unwrap();
    post
}
