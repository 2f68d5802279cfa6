//! In-memory implementation of UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use engage_core::entities::User;
use engage_core::traits::{RepoResult, UserRepository};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of UserRepository
#[derive(Default)]
pub struct MemUserRepository {
    users: RwLock<HashMap<Snowflake, User>>,
}

impl MemUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_active_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .read()
            .get(&id)
            .filter(|u| u.is_active)
            .cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.users.write().insert(user.id, user.clone());
        Ok(())
    }

    async fn update_counters(
        &self,
        user_id: Snowflake,
        followers: i64,
        following: i64,
        posts: i64,
    ) -> RepoResult<()> {
        if let Some(user) = self.users.write().get_mut(&user_id) {
            user.followers_count = followers;
            user.following_count = following;
            user.posts_count = posts;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_active(&self, user_id: Snowflake, active: bool) -> RepoResult<()> {
        if let Some(user) = self.users.write().get_mut(&user_id) {
            user.is_active = active;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_active_excludes_inactive() {
        let repo = MemUserRepository::new();
        let mut user = User::new(Snowflake::new(1), "alice".to_string());
        user.deactivate();
        repo.create(&user).await.unwrap();

        assert!(repo.find_by_id(Snowflake::new(1)).await.unwrap().is_some());
        assert!(repo
            .find_active_by_id(Snowflake::new(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_counters() {
        let repo = MemUserRepository::new();
        repo.create(&User::new(Snowflake::new(1), "alice".to_string()))
            .await
            .unwrap();

        repo.update_counters(Snowflake::new(1), 3, 5, 7).await.unwrap();

        let user = repo.find_by_id(Snowflake::new(1)).await.unwrap().unwrap();
        assert_eq!(user.followers_count, 3);
        assert_eq!(user.following_count, 5);
        assert_eq!(user.posts_count, 7);
    }
}
