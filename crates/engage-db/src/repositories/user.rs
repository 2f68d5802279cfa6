//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use engage_core::entities::User;
use engage_core::traits::{RepoResult, UserRepository};
use engage_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, username, full_name, is_active,
                   followers_count, following_count, posts_count,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_active_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, username, full_name, is_active,
                   followers_count, following_count, posts_count,
                   created_at, updated_at
            FROM users
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, full_name, is_active,
                               followers_count, following_count, posts_count,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(user.followers_count)
        .bind(user.following_count)
        .bind(user.posts_count)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_counters(
        &self,
        user_id: Snowflake,
        followers: i64,
        following: i64,
        posts: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET followers_count = $2, following_count = $3, posts_count = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .bind(followers)
        .bind(following)
        .bind(posts)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, user_id: Snowflake, active: bool) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
