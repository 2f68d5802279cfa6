//! Social actions facade
//!
//! Thin orchestration over the engine: each action mutates the
//! relationship row, resyncs the affected counters, then emits the
//! matching notification or fan-out. A resync or notification failure is
//! logged and never rolls the action back; the relationship row is the
//! source of truth and the next resync repairs the counters.

use engage_core::entities::{Comment, Follow, Like, Post, PostCounters, Share, User};
use engage_core::Snowflake;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::counters::CounterService;
use super::error::{ServiceError, ServiceResult};
use super::notification::{FanOutReport, NotificationService};

/// Maximum post content length in characters
const MAX_POST_LEN: usize = 500;

/// Maximum comment content length in characters
const MAX_COMMENT_LEN: usize = 300;

/// Social actions facade
pub struct SocialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SocialService<'a> {
    /// Create a new SocialService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn counters(&self) -> CounterService<'a> {
        CounterService::new(self.ctx)
    }

    fn notifications(&self) -> NotificationService<'a> {
        NotificationService::new(self.ctx)
    }

    async fn active_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_active_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn existing_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))
    }

    async fn post_counters_after_resync(&self, post: &Post) -> PostCounters {
        match self.counters().resync_post_counters(post.id).await {
            Ok(counters) => counters,
            Err(e) => {
                warn!(post_id = %post.id, error = %e, "Post counter resync failed after action");
                post.counters()
            }
        }
    }

    async fn resync_user_logged(&self, user_id: Snowflake) {
        if let Err(e) = self.counters().resync_user_counters(user_id).await {
            warn!(user_id = %user_id, error = %e, "User counter resync failed after action");
        }
    }

    // ========================================================================
    // Likes
    // ========================================================================

    /// Like a post. Idempotent: liking twice leaves one like.
    #[instrument(skip(self))]
    pub async fn like_post(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<PostCounters> {
        let user = self.active_user(user_id).await?;
        let post = self.existing_post(post_id).await?;

        let inserted = self
            .ctx
            .like_repo()
            .create(&Like::new(post_id, user_id))
            .await?;
        let counters = self.post_counters_after_resync(&post).await;

        if inserted {
            if let Err(e) = self.notifications().notify_like(&post, &user).await {
                warn!(post_id = %post_id, error = %e, "Like notification failed");
            }
            info!(user_id = %user_id, post_id = %post_id, "Post liked");
        }
        Ok(counters)
    }

    /// Remove a like. Idempotent: unliking a post that was never liked is
    /// a no-op.
    #[instrument(skip(self))]
    pub async fn unlike_post(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<PostCounters> {
        self.active_user(user_id).await?;
        let post = self.existing_post(post_id).await?;

        let removed = self.ctx.like_repo().delete(post_id, user_id).await?;
        let counters = self.post_counters_after_resync(&post).await;

        if removed {
            info!(user_id = %user_id, post_id = %post_id, "Post unliked");
        }
        Ok(counters)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Comment on a post
    #[instrument(skip(self, content))]
    pub async fn comment_on_post(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
        content: &str,
    ) -> ServiceResult<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Comment cannot be empty"));
        }
        if content.chars().count() > MAX_COMMENT_LEN {
            return Err(ServiceError::validation(format!(
                "Comment cannot exceed {MAX_COMMENT_LEN} characters"
            )));
        }

        let user = self.active_user(user_id).await?;
        let post = self.existing_post(post_id).await?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            post_id,
            user_id,
            content.to_string(),
        );
        self.ctx.comment_repo().create(&comment).await?;
        self.post_counters_after_resync(&post).await;

        if let Err(e) = self
            .notifications()
            .notify_comment(&post, &user, &comment)
            .await
        {
            warn!(post_id = %post_id, error = %e, "Comment notification failed");
        }

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    // ========================================================================
    // Shares
    // ========================================================================

    /// Share a post. Idempotent: sharing twice leaves one share.
    #[instrument(skip(self))]
    pub async fn share_post(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<PostCounters> {
        self.active_user(user_id).await?;
        let post = self.existing_post(post_id).await?;

        let inserted = self
            .ctx
            .share_repo()
            .create(&Share::new(post_id, user_id))
            .await?;
        let counters = self.post_counters_after_resync(&post).await;

        if inserted {
            info!(user_id = %user_id, post_id = %post_id, "Post shared");
        }
        Ok(counters)
    }

    // ========================================================================
    // Follows
    // ========================================================================

    /// Follow a user. Idempotent; returns true when the edge is new.
    /// Self-follow is a validation error.
    #[instrument(skip(self))]
    pub async fn follow_user(
        &self,
        follower_id: Snowflake,
        following_id: Snowflake,
    ) -> ServiceResult<bool> {
        let follower = self.active_user(follower_id).await?;
        let followed = self.active_user(following_id).await?;

        let edge = Follow::new(follower_id, following_id)?;
        let inserted = self.ctx.follow_repo().create(&edge).await?;

        self.resync_user_logged(follower_id).await;
        self.resync_user_logged(following_id).await;

        if inserted {
            if let Err(e) = self.notifications().notify_follow(&followed, &follower).await {
                warn!(following_id = %following_id, error = %e, "Follow notification failed");
            }
            info!(follower_id = %follower_id, following_id = %following_id, "Follow created");
        }
        Ok(inserted)
    }

    /// Unfollow a user. Removing an edge that does not exist is not-found.
    #[instrument(skip(self))]
    pub async fn unfollow_user(
        &self,
        follower_id: Snowflake,
        following_id: Snowflake,
    ) -> ServiceResult<()> {
        self.active_user(follower_id).await?;

        let removed = self
            .ctx
            .follow_repo()
            .delete(follower_id, following_id)
            .await?;
        if !removed {
            return Err(ServiceError::not_found(
                "Follow",
                format!("{follower_id}->{following_id}"),
            ));
        }

        self.resync_user_logged(follower_id).await;
        self.resync_user_logged(following_id).await;

        info!(follower_id = %follower_id, following_id = %following_id, "Follow removed");
        Ok(())
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Create a post and fan it out to the author's followers.
    ///
    /// The post is the deliverable; a fan-out failure is logged and
    /// reported as an empty delivery, never as a failed create.
    #[instrument(skip(self, content))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        content: &str,
    ) -> ServiceResult<(Post, FanOutReport)> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Post cannot be empty"));
        }
        if content.chars().count() > MAX_POST_LEN {
            return Err(ServiceError::validation(format!(
                "Post cannot exceed {MAX_POST_LEN} characters"
            )));
        }

        self.active_user(author_id).await?;

        let post = Post::new(self.ctx.generate_id(), author_id, content.to_string());
        self.ctx.post_repo().create(&post).await?;
        self.resync_user_logged(author_id).await;

        let report = match self
            .notifications()
            .fan_out_new_post(author_id, post.id, None)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                warn!(post_id = %post.id, error = %e, "Fan-out failed after post create");
                FanOutReport::default()
            }
        };

        info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok((post, report))
    }
}
