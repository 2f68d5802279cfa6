//! Counter resync service
//!
//! Denormalized counters are never incremented or decremented in place.
//! Every write here recounts from the source relationship tables and
//! overwrites the stored value, so the operations are idempotent and
//! double as repair for drifted counters.

use engage_core::entities::{PostCounters, UserCounters};
use engage_core::Snowflake;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Counter resync service
pub struct CounterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CounterService<'a> {
    /// Create a new CounterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recount a user's followers, following, and posts from source rows
    /// and overwrite the stored counters in one call.
    ///
    /// A user with no relationships resolves to all zeros; that is a valid
    /// result, not an error.
    #[instrument(skip(self))]
    pub async fn resync_user_counters(&self, user_id: Snowflake) -> ServiceResult<UserCounters> {
        let followers = self.ctx.follow_repo().count_followers(user_id).await?;
        let following = self.ctx.follow_repo().count_following(user_id).await?;
        let posts = self.ctx.post_repo().count_by_author(user_id).await?;

        self.ctx
            .user_repo()
            .update_counters(user_id, followers, following, posts)
            .await?;

        info!(
            user_id = %user_id,
            followers,
            following,
            posts,
            "User counters resynced"
        );

        Ok(UserCounters {
            followers: followers.max(0),
            following: following.max(0),
            posts: posts.max(0),
        })
    }

    /// Recount a post's likes, comments, and shares from source rows and
    /// overwrite the stored counters in one call.
    #[instrument(skip(self))]
    pub async fn resync_post_counters(&self, post_id: Snowflake) -> ServiceResult<PostCounters> {
        let likes = self.ctx.like_repo().count_by_post(post_id).await?;
        let comments = self.ctx.comment_repo().count_by_post(post_id).await?;
        let shares = self.ctx.share_repo().count_by_post(post_id).await?;

        self.ctx
            .post_repo()
            .update_counters(post_id, likes, comments, shares)
            .await?;

        info!(
            post_id = %post_id,
            likes,
            comments,
            shares,
            "Post counters resynced"
        );

        Ok(PostCounters {
            likes: likes.max(0),
            comments: comments.max(0),
            shares: shares.max(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{mem_context, seed_post, seed_user};
    use engage_core::entities::{Comment, Follow, Like, Share};

    #[tokio::test]
    async fn test_resync_user_counters_from_source_rows() {
        let ctx = mem_context();
        seed_user(&ctx, 1, "alice").await;
        seed_user(&ctx, 2, "bob").await;
        seed_user(&ctx, 3, "carol").await;
        seed_post(&ctx, 100, 1, "first").await;
        seed_post(&ctx, 101, 1, "second").await;

        // bob and carol follow alice, alice follows bob
        for (follower, following) in [(2, 1), (3, 1), (1, 2)] {
            let edge = Follow::new(Snowflake::new(follower), Snowflake::new(following)).unwrap();
            ctx.follow_repo().create(&edge).await.unwrap();
        }

        let service = CounterService::new(&ctx);
        let counters = service.resync_user_counters(Snowflake::new(1)).await.unwrap();

        assert_eq!(counters.followers, 2);
        assert_eq!(counters.following, 1);
        assert_eq!(counters.posts, 2);

        // stored row matches the returned struct
        let user = ctx
            .user_repo()
            .find_by_id(Snowflake::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.followers_count, 2);
        assert_eq!(user.following_count, 1);
        assert_eq!(user.posts_count, 2);
    }

    #[tokio::test]
    async fn test_resync_with_no_relationships_is_zero_not_error() {
        let ctx = mem_context();
        seed_user(&ctx, 1, "alice").await;

        let service = CounterService::new(&ctx);
        let counters = service.resync_user_counters(Snowflake::new(1)).await.unwrap();
        assert_eq!(counters, UserCounters::default());
    }

    #[tokio::test]
    async fn test_resync_is_idempotent() {
        let ctx = mem_context();
        seed_user(&ctx, 1, "alice").await;
        seed_user(&ctx, 2, "bob").await;
        let edge = Follow::new(Snowflake::new(2), Snowflake::new(1)).unwrap();
        ctx.follow_repo().create(&edge).await.unwrap();

        let service = CounterService::new(&ctx);
        let first = service.resync_user_counters(Snowflake::new(1)).await.unwrap();
        let second = service.resync_user_counters(Snowflake::new(1)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resync_post_counters_after_action_sequence() {
        let ctx = mem_context();
        seed_user(&ctx, 1, "alice").await;
        seed_post(&ctx, 100, 1, "post").await;

        // like, like, unlike leaves one like
        ctx.like_repo()
            .create(&Like::new(Snowflake::new(100), Snowflake::new(2)))
            .await
            .unwrap();
        ctx.like_repo()
            .create(&Like::new(Snowflake::new(100), Snowflake::new(3)))
            .await
            .unwrap();
        ctx.like_repo()
            .delete(Snowflake::new(100), Snowflake::new(3))
            .await
            .unwrap();

        ctx.comment_repo()
            .create(&Comment::new(
                Snowflake::new(200),
                Snowflake::new(100),
                Snowflake::new(2),
                "nice".to_string(),
            ))
            .await
            .unwrap();
        ctx.share_repo()
            .create(&Share::new(Snowflake::new(100), Snowflake::new(4)))
            .await
            .unwrap();

        let service = CounterService::new(&ctx);
        let counters = service.resync_post_counters(Snowflake::new(100)).await.unwrap();
        assert_eq!(counters.likes, 1);
        assert_eq!(counters.comments, 1);
        assert_eq!(counters.shares, 1);
    }

    #[tokio::test]
    async fn test_resync_repairs_drifted_counters() {
        let ctx = mem_context();
        seed_user(&ctx, 1, "alice").await;
        seed_post(&ctx, 100, 1, "post").await;

        // drift the stored counters away from the source of truth
        ctx.post_repo()
            .update_counters(Snowflake::new(100), 40, -3, 12)
            .await
            .unwrap();

        let service = CounterService::new(&ctx);
        let counters = service.resync_post_counters(Snowflake::new(100)).await.unwrap();
        assert_eq!(counters, PostCounters::default());
    }
}
