//! Notification entity <-> model mapper

use engage_core::entities::{Notification, NotificationKind};
use engage_core::value_objects::Snowflake;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            sender_id: model.sender_id.map(Snowflake::new),
            // Unknown labels only appear if the table outruns the enum;
            // treat them as system notifications rather than failing the read.
            kind: NotificationKind::parse(&model.kind).unwrap_or(NotificationKind::System),
            title: model.title,
            message: model.message,
            data: model.data,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}
