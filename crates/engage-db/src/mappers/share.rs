//! Share entity <-> model mapper

use engage_core::entities::Share;
use engage_core::value_objects::Snowflake;

use crate::models::ShareModel;

impl From<ShareModel> for Share {
    fn from(model: ShareModel) -> Self {
        Share {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}
