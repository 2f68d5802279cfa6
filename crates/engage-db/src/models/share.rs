//! Share database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for shares table
#[derive(Debug, Clone, FromRow)]
pub struct ShareModel {
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
