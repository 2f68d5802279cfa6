//! In-memory implementation of CommentRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use engage_core::entities::Comment;
use engage_core::traits::{CommentRepository, RepoResult};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of CommentRepository
#[derive(Default)]
pub struct MemCommentRepository {
    comments: RwLock<HashMap<Snowflake, Comment>>,
}

impl MemCommentRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for MemCommentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.comments.read().get(&id).cloned())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.comments.write().insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.comments.write().remove(&id).is_some())
    }

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .comments
            .read()
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as i64)
    }
}
