//! In-memory implementation of ShareRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use engage_core::entities::Share;
use engage_core::traits::{RepoResult, ShareRepository};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of ShareRepository
#[derive(Default)]
pub struct MemShareRepository {
    // keyed (post, user)
    shares: RwLock<HashMap<(Snowflake, Snowflake), Share>>,
}

impl MemShareRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareRepository for MemShareRepository {
    async fn create(&self, share: &Share) -> RepoResult<bool> {
        let key = (share.post_id, share.user_id);
        let mut shares = self.shares.write();
        if shares.contains_key(&key) {
            return Ok(false);
        }
        shares.insert(key, share.clone());
        Ok(true)
    }

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .shares
            .read()
            .keys()
            .filter(|(post, _)| *post == post_id)
            .count() as i64)
    }
}
