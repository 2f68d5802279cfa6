//! In-memory implementation of LikeRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use engage_core::entities::Like;
use engage_core::traits::{LikeRepository, RepoResult};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of LikeRepository
#[derive(Default)]
pub struct MemLikeRepository {
    // keyed (post, user)
    likes: RwLock<HashMap<(Snowflake, Snowflake), Like>>,
}

impl MemLikeRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for MemLikeRepository {
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Like>> {
        Ok(self.likes.read().get(&(post_id, user_id)).cloned())
    }

    async fn create(&self, like: &Like) -> RepoResult<bool> {
        let key = (like.post_id, like.user_id);
        let mut likes = self.likes.write();
        if likes.contains_key(&key) {
            return Ok(false);
        }
        likes.insert(key, like.clone());
        Ok(true)
    }

    async fn delete(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.likes.write().remove(&(post_id, user_id)).is_some())
    }

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .likes
            .read()
            .keys()
            .filter(|(post, _)| *post == post_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_like_unlike_cycle() {
        let repo = MemLikeRepository::new();
        let like = Like::new(Snowflake::new(1), Snowflake::new(2));

        assert!(repo.create(&like).await.unwrap());
        assert!(!repo.create(&like).await.unwrap());
        assert_eq!(repo.count_by_post(Snowflake::new(1)).await.unwrap(), 1);

        assert!(repo.delete(Snowflake::new(1), Snowflake::new(2)).await.unwrap());
        assert!(!repo.delete(Snowflake::new(1), Snowflake::new(2)).await.unwrap());
        assert_eq!(repo.count_by_post(Snowflake::new(1)).await.unwrap(), 0);
    }
}
