//! In-memory implementation of FollowRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use engage_core::entities::Follow;
use engage_core::traits::{FollowRepository, RepoResult};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of FollowRepository
#[derive(Default)]
pub struct MemFollowRepository {
    // keyed (follower, following)
    follows: RwLock<HashMap<(Snowflake, Snowflake), Follow>>,
}

impl MemFollowRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FollowRepository for MemFollowRepository {
    async fn find(
        &self,
        follower_id: Snowflake,
        following_id: Snowflake,
    ) -> RepoResult<Option<Follow>> {
        Ok(self
            .follows
            .read()
            .get(&(follower_id, following_id))
            .cloned())
    }

    async fn create(&self, follow: &Follow) -> RepoResult<bool> {
        let key = (follow.follower_id, follow.following_id);
        let mut follows = self.follows.write();
        if follows.contains_key(&key) {
            return Ok(false);
        }
        follows.insert(key, follow.clone());
        Ok(true)
    }

    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .follows
            .write()
            .remove(&(follower_id, following_id))
            .is_some())
    }

    async fn count_followers(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .follows
            .read()
            .keys()
            .filter(|(_, following)| *following == user_id)
            .count() as i64)
    }

    async fn count_following(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .follows
            .read()
            .keys()
            .filter(|(follower, _)| *follower == user_id)
            .count() as i64)
    }

    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let mut edges: Vec<&Follow> = Vec::new();
        let follows = self.follows.read();
        for follow in follows.values() {
            if follow.following_id == user_id {
                edges.push(follow);
            }
        }
        edges.sort_by_key(|f| f.created_at);
        Ok(edges.iter().map(|f| f.follower_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let repo = MemFollowRepository::new();
        let follow = Follow::new(Snowflake::new(1), Snowflake::new(2)).unwrap();

        assert!(repo.create(&follow).await.unwrap());
        assert!(!repo.create(&follow).await.unwrap());
        assert_eq!(repo.count_followers(Snowflake::new(2)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_edge() {
        let repo = MemFollowRepository::new();
        assert!(!repo.delete(Snowflake::new(1), Snowflake::new(2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_follower_ids() {
        let repo = MemFollowRepository::new();
        for follower in [3, 4, 5] {
            let follow = Follow::new(Snowflake::new(follower), Snowflake::new(1)).unwrap();
            repo.create(&follow).await.unwrap();
        }

        let ids = repo.follower_ids(Snowflake::new(1)).await.unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(repo.count_following(Snowflake::new(3)).await.unwrap(), 1);
    }
}
