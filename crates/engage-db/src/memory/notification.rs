//! In-memory implementation of NotificationRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use engage_core::entities::{Notification, NotificationKind};
use engage_core::traits::{NotificationQuery, NotificationRepository, RepoResult};
use engage_core::value_objects::Snowflake;

/// In-memory implementation of NotificationRepository
#[derive(Default)]
pub struct MemNotificationRepository {
    notifications: RwLock<HashMap<Snowflake, Notification>>,
}

impl MemNotificationRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
    ) -> Vec<Notification> {
        let mut rows: Vec<Notification> = self
            .notifications
            .read()
            .values()
            .filter(|n| n.recipient_id == recipient_id && query.matches(n))
            .cloned()
            .collect();
        // created_at DESC, id DESC
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl NotificationRepository for MemNotificationRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.notifications.read().get(&id).cloned())
    }

    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.notifications
            .write()
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_recent_duplicate(
        &self,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        kind: NotificationKind,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<Option<Notification>> {
        let notifications = self.notifications.read();
        let newest = notifications
            .values()
            .filter(|n| {
                n.recipient_id == recipient_id
                    && n.sender_id == Some(sender_id)
                    && n.kind == kind
                    && n.created_at >= cutoff
            })
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(newest.cloned())
    }

    async fn find_page_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
        page: u32,
        page_size: u32,
    ) -> RepoResult<(Vec<Notification>, u64)> {
        let rows = self.sorted_for_recipient(recipient_id, query);
        let total = rows.len() as u64;

        let page = page.max(1);
        let start = ((page - 1) as usize).saturating_mul(page_size as usize);
        let items = rows
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok((items, total))
    }

    async fn count_for_recipient(
        &self,
        recipient_id: Snowflake,
        query: &NotificationQuery,
    ) -> RepoResult<u64> {
        Ok(self
            .notifications
            .read()
            .values()
            .filter(|n| n.recipient_id == recipient_id && query.matches(n))
            .count() as u64)
    }

    async fn count_unread(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        Ok(self
            .notifications
            .read()
            .values()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as u64)
    }

    async fn count_since(&self, recipient_id: Snowflake, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        Ok(self
            .notifications
            .read()
            .values()
            .filter(|n| n.recipient_id == recipient_id && n.created_at >= cutoff)
            .count() as u64)
    }

    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool> {
        let mut notifications = self.notifications.write();
        match notifications.get_mut(&id) {
            Some(n) if n.recipient_id == recipient_id => {
                n.mark_read();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let mut updated = 0;
        let mut notifications = self.notifications.write();
        for n in notifications.values_mut() {
            if n.recipient_id == recipient_id && !n.is_read {
                n.mark_read();
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool> {
        let mut notifications = self.notifications.write();
        match notifications.get(&id) {
            Some(n) if n.recipient_id == recipient_id => {
                notifications.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut notifications = self.notifications.write();
        let before = notifications.len();
        notifications.retain(|_, n| n.created_at >= cutoff);
        Ok((before - notifications.len()) as u64)
    }
}
