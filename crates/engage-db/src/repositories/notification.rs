//! PostgreSQL implementation of NotificationRepository
//!
//! Listing and counting share one WHERE shape: optional filters are bound
//! as NULLs so the SQL stays static and the bind order fixed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use engage_core::entities::{Notification, NotificationKind};
use engage_core::traits::{NotificationQuery, NotificationRepository, RepoResult};
use engage_core::value_objects::Snowflake;

use crate::models::NotificationModel;

use super::error::map_db_error;

const FILTER_CLAUSE: &str = r#"
    recipient_id = $1
    AND (NOT $2 OR is_read = FALSE)
    AND ($3::text IS NULL OR kind = $3)
    AND ($4::bigint IS NULL OR sender_id = $4)
    AND ($5::timestamptz IS NULL OR created_at >= $5)
    AND ($6::timestamptz IS NULL OR created_at <= $6)
"#;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_filtered(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
    ) -> RepoResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM notifications WHERE {FILTER_CLAUSE}");

        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(recipient_id.into_inner())
            .bind(query.unread_only)
            .bind(query.kind.map(|k| k.as_str()))
            .bind(query.sender_id.map(Snowflake::into_inner))
            .bind(query.date_from)
            .bind(query.date_to)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, sender_id, kind, title, message, data,
                   is_read, created_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Notification::from))
    }

    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, sender_id, kind, title,
                                       message, data, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.id.into_inner())
        .bind(notification.recipient_id.into_inner())
        .bind(notification.sender_id.map(Snowflake::into_inner))
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.data)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_recent_duplicate(
        &self,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        kind: NotificationKind,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, sender_id, kind, title, message, data,
                   is_read, created_at
            FROM notifications
            WHERE recipient_id = $1 AND sender_id = $2 AND kind = $3
              AND created_at >= $4
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(recipient_id.into_inner())
        .bind(sender_id.into_inner())
        .bind(kind.as_str())
        .bind(cutoff)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Notification::from))
    }

    #[instrument(skip(self, query))]
    async fn find_page_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
        page: u32,
        page_size: u32,
    ) -> RepoResult<(Vec<Notification>, u64)> {
        let total = self.count_filtered(recipient_id, query).await?;

        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let sql = format!(
            r#"
            SELECT id, recipient_id, sender_id, kind, title, message, data,
                   is_read, created_at
            FROM notifications
            WHERE {FILTER_CLAUSE}
            ORDER BY created_at DESC, id DESC
            LIMIT $7 OFFSET $8
            "#
        );

        let results = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(recipient_id.into_inner())
            .bind(query.unread_only)
            .bind(query.kind.map(|k| k.as_str()))
            .bind(query.sender_id.map(Snowflake::into_inner))
            .bind(query.date_from)
            .bind(query.date_to)
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok((results.into_iter().map(Notification::from).collect(), total))
    }

    #[instrument(skip(self, query))]
    async fn count_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
    ) -> RepoResult<u64> {
        self.count_filtered(recipient_id, query).await
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE recipient_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(recipient_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn count_since(
        &self,
        recipient_id: Snowflake,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE recipient_id = $1 AND created_at >= $2
            "#,
        )
        .bind(recipient_id.into_inner())
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool> {
        // Ownership-checked; matching an already-read row still counts as
        // success for the caller.
        let result = sqlx::query(
            r#"
            UPDATE notifications SET is_read = TRUE
            WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(recipient_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET is_read = TRUE
            WHERE recipient_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(recipient_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(recipient_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications WHERE created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
