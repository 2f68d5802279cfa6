//! Service context - dependency container for services
//!
//! Holds the repositories, the Snowflake generator, and the engine
//! tunables. The services never see a concrete storage type; everything
//! arrives as `Arc<dyn Trait>`.

use std::sync::Arc;

use engage_common::EngineConfig;
use engage_core::traits::{
    CommentRepository, FollowRepository, LikeRepository, NotificationRepository, PostRepository,
    ShareRepository, UserRepository,
};
use engage_core::SnowflakeGenerator;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    post_repo: Arc<dyn PostRepository>,
    like_repo: Arc<dyn LikeRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    share_repo: Arc<dyn ShareRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // ID generation
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Engine tunables
    engine: EngineConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        post_repo: Arc<dyn PostRepository>,
        like_repo: Arc<dyn LikeRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        share_repo: Arc<dyn ShareRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        engine: EngineConfig,
    ) -> Self {
        Self {
            user_repo,
            follow_repo,
            post_repo,
            like_repo,
            comment_repo,
            share_repo,
            notification_repo,
            snowflake_generator,
            engine,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the like repository
    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the share repository
    pub fn share_repo(&self) -> &dyn ShareRepository {
        self.share_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the notification repository as a shared handle (fan-out workers)
    pub fn notification_repo_arc(&self) -> Arc<dyn NotificationRepository> {
        Arc::clone(&self.notification_repo)
    }

    /// Get the user repository as a shared handle (fan-out workers)
    pub fn user_repo_arc(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.user_repo)
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> engage_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Get the engine tunables
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("engine", &self.engine)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    share_repo: Option<Arc<dyn ShareRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    engine: EngineConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            follow_repo: None,
            post_repo: None,
            like_repo: None,
            comment_repo: None,
            share_repo: None,
            notification_repo: None,
            snowflake_generator: None,
            engine: EngineConfig::default(),
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn share_repo(mut self, repo: Arc<dyn ShareRepository>) -> Self {
        self.share_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.follow_repo
                .ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.like_repo
                .ok_or_else(|| ServiceError::validation("like_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.share_repo
                .ok_or_else(|| ServiceError::validation("share_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.engine,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
