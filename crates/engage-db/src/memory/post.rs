//! In-memory implementation of PostRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use engage_core::entities::Post;
use engage_core::traits::{PostRepository, RepoResult};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of PostRepository
#[derive(Default)]
pub struct MemPostRepository {
    posts: RwLock<HashMap<Snowflake, Post>>,
}

impl MemPostRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemPostRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.posts.read().get(&id).cloned())
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.posts.write().insert(post.id, post.clone());
        Ok(())
    }

    async fn update_counters(
        &self,
        post_id: Snowflake,
        likes: i64,
        comments: i64,
        shares: i64,
    ) -> RepoResult<()> {
        if let Some(post) = self.posts.write().get_mut(&post_id) {
            post.likes_count = likes;
            post.comments_count = comments;
            post.shares_count = shares;
        }
        Ok(())
    }

    async fn count_by_author(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .posts
            .read()
            .values()
            .filter(|p| p.author_id == user_id)
            .count() as i64)
    }

    async fn find_engaged_since(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        let mut results: Vec<Post> = self
            .posts
            .read()
            .values()
            .filter(|p| p.created_at >= cutoff && p.has_engagement())
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_find_engaged_since_excludes_zero_engagement() {
        let repo = MemPostRepository::new();

        let quiet = Post::new(Snowflake::new(1), Snowflake::new(10), "quiet".to_string());
        let mut busy = Post::new(Snowflake::new(2), Snowflake::new(10), "busy".to_string());
        busy.likes_count = 2;

        repo.create(&quiet).await.unwrap();
        repo.create(&busy).await.unwrap();

        let cutoff = Utc::now() - Duration::hours(1);
        let engaged = repo.find_engaged_since(cutoff).await.unwrap();
        assert_eq!(engaged.len(), 1);
        assert_eq!(engaged[0].id, Snowflake::new(2));
    }

    #[tokio::test]
    async fn test_find_engaged_since_excludes_old_posts() {
        let repo = MemPostRepository::new();

        let mut old = Post::new(Snowflake::new(1), Snowflake::new(10), "old".to_string());
        old.likes_count = 5;
        old.created_at = Utc::now() - Duration::hours(100);
        repo.create(&old).await.unwrap();

        let cutoff = Utc::now() - Duration::hours(72);
        assert!(repo.find_engaged_since(cutoff).await.unwrap().is_empty());
    }
}
