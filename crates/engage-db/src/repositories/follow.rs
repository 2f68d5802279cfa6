//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use engage_core::entities::Follow;
use engage_core::traits::{FollowRepository, RepoResult};
use engage_core::value_objects::Snowflake;

use crate::models::FollowModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        follower_id: Snowflake,
        following_id: Snowflake,
    ) -> RepoResult<Option<Follow>> {
        let result = sqlx::query_as::<_, FollowModel>(
            r#"
            SELECT follower_id, following_id, created_at
            FROM follows
            WHERE follower_id = $1 AND following_id = $2
            "#,
        )
        .bind(follower_id.into_inner())
        .bind(following_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Follow::from))
    }

    #[instrument(skip(self, follow))]
    async fn create(&self, follow: &Follow) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, following_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, following_id) DO NOTHING
            "#,
        )
        .bind(follow.follower_id.into_inner())
        .bind(follow.following_id.into_inner())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM follows WHERE follower_id = $1 AND following_id = $2
            "#,
        )
        .bind(follower_id.into_inner())
        .bind(following_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_followers(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM follows WHERE following_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn count_following(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM follows WHERE follower_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT follower_id FROM follows WHERE following_id = $1 ORDER BY created_at
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFollowRepository>();
    }
}
