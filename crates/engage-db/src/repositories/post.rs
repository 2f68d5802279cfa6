//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use engage_core::entities::Post;
use engage_core::traits::{PostRepository, RepoResult};
use engage_core::value_objects::Snowflake;

use crate::models::PostModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, content,
                   likes_count, comments_count, shares_count, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content,
                               likes_count, comments_count, shares_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .bind(post.likes_count)
        .bind(post.comments_count)
        .bind(post.shares_count)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_counters(
        &self,
        post_id: Snowflake,
        likes: i64,
        comments: i64,
        shares: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE posts
            SET likes_count = $2, comments_count = $3, shares_count = $4
            WHERE id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .bind(likes)
        .bind(comments)
        .bind(shares)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_author(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM posts WHERE author_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_engaged_since(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, content,
                   likes_count, comments_count, shares_count, created_at
            FROM posts
            WHERE created_at >= $1
              AND (likes_count > 0 OR comments_count > 0 OR shares_count > 0)
            ORDER BY created_at DESC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }
}
