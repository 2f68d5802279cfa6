//! PostgreSQL implementation of ShareRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use engage_core::entities::Share;
use engage_core::traits::{RepoResult, ShareRepository};
use engage_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of ShareRepository
#[derive(Clone)]
pub struct PgShareRepository {
    pool: PgPool,
}

impl PgShareRepository {
    /// Create a new PgShareRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareRepository for PgShareRepository {
    #[instrument(skip(self, share))]
    async fn create(&self, share: &Share) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO shares (post_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(share.post_id.into_inner())
        .bind(share.user_id.into_inner())
        .bind(share.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM shares WHERE post_id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
