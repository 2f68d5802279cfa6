//! Fixtures seeded directly through the repositories
//!
//! Accounts are owned by an upstream system in production; tests plant
//! them straight into storage.

use engage_core::entities::{Post, User};
use engage_core::Snowflake;
use engage_service::ServiceContext;

/// Seed an active user
pub async fn seed_user(ctx: &ServiceContext, id: i64, username: &str) -> User {
    let user = User::new(Snowflake::new(id), username.to_string());
    ctx.user_repo()
        .create(&user)
        .await
        .expect("failed to seed user");
    user
}

/// Seed a deactivated user
pub async fn seed_inactive_user(ctx: &ServiceContext, id: i64, username: &str) -> User {
    let mut user = User::new(Snowflake::new(id), username.to_string());
    user.deactivate();
    ctx.user_repo()
        .create(&user)
        .await
        .expect("failed to seed user");
    user
}

/// Seed a post with a fresh generated id
pub async fn seed_post(ctx: &ServiceContext, author_id: i64, content: &str) -> Post {
    let post = Post::new(
        ctx.generate_id(),
        Snowflake::new(author_id),
        content.to_string(),
    );
    ctx.post_repo()
        .create(&post)
        .await
        .expect("failed to seed post");
    post
}
