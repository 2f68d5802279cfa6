//! Notification entity and kind policy
//!
//! Lifecycle: unread -> read (one-way), deleted only by explicit owner
//! delete or age-based cleanup. `sender_id == None` means the system sent
//! it; a notification is never addressed to its own sender.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Notification kind
///
/// Per-kind behavior lives in the methods below. Adding a kind means
/// adding a match arm in each table, not editing control flow elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
    PostUpdate,
    System,
}

impl NotificationKind {
    /// Window inside which a repeat `(recipient, sender, kind)` event for
    /// the same post collapses into the existing row. None disables dedup
    /// for the kind.
    pub fn dedup_window(&self) -> Option<Duration> {
        match self {
            Self::Like | Self::Comment => Some(Duration::minutes(5)),
            Self::Follow | Self::Mention | Self::PostUpdate | Self::System => None,
        }
    }

    /// Stable wire/database label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
            Self::Mention => "mention",
            Self::PostUpdate => "post_update",
            Self::System => "system",
        }
    }

    /// Parse a stable label back into a kind
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "comment" => Some(Self::Comment),
            "follow" => Some(Self::Follow),
            "mention" => Some(Self::Mention),
            "post_update" => Some(Self::PostUpdate),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    /// None = sent by the system
    pub sender_id: Option<Snowflake>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread Notification
    pub fn new(
        id: Snowflake,
        recipient_id: Snowflake,
        sender_id: Option<Snowflake>,
        kind: NotificationKind,
        title: String,
        message: String,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id,
            recipient_id,
            sender_id,
            kind,
            title,
            message,
            data,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Mark as read. One-way: a read notification never becomes unread.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// The `postId` field of the payload, if any. Used for dedup matching.
    pub fn post_id_in_data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref().and_then(|d| d.get("postId"))
    }

    /// Sent by the system rather than a user
    #[inline]
    pub fn is_system(&self) -> bool {
        self.sender_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(kind: NotificationKind) -> Notification {
        Notification::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Some(Snowflake::new(20)),
            kind,
            "title".to_string(),
            "message".to_string(),
            Some(json!({"postId": "77"})),
        )
    }

    #[test]
    fn test_new_notification_is_unread() {
        let n = sample(NotificationKind::Like);
        assert!(!n.is_read);
        assert!(!n.is_system());
    }

    #[test]
    fn test_mark_read_is_one_way() {
        let mut n = sample(NotificationKind::Comment);
        n.mark_read();
        assert!(n.is_read);
        n.mark_read();
        assert!(n.is_read);
    }

    #[test]
    fn test_dedup_window_policy() {
        assert_eq!(
            NotificationKind::Like.dedup_window(),
            Some(Duration::minutes(5))
        );
        assert_eq!(
            NotificationKind::Comment.dedup_window(),
            Some(Duration::minutes(5))
        );
        assert_eq!(NotificationKind::Follow.dedup_window(), None);
        assert_eq!(NotificationKind::Mention.dedup_window(), None);
        assert_eq!(NotificationKind::PostUpdate.dedup_window(), None);
        assert_eq!(NotificationKind::System.dedup_window(), None);
    }

    #[test]
    fn test_kind_label_roundtrip() {
        for kind in [
            NotificationKind::Like,
            NotificationKind::Comment,
            NotificationKind::Follow,
            NotificationKind::Mention,
            NotificationKind::PostUpdate,
            NotificationKind::System,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::parse("bogus"), None);
    }

    #[test]
    fn test_post_id_in_data() {
        let n = sample(NotificationKind::Like);
        assert_eq!(n.post_id_in_data(), Some(&json!("77")));

        let mut no_data = sample(NotificationKind::Follow);
        no_data.data = None;
        assert_eq!(no_data.post_id_in_data(), None);
    }
}
