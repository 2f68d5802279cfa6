//! Follow entity <-> model mapper

use engage_core::entities::Follow;
use engage_core::value_objects::Snowflake;

use crate::models::FollowModel;

impl From<FollowModel> for Follow {
    fn from(model: FollowModel) -> Self {
        Follow {
            follower_id: Snowflake::new(model.follower_id),
            following_id: Snowflake::new(model.following_id),
            created_at: model.created_at,
        }
    }
}
