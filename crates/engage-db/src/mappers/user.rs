//! User entity <-> model mapper

use engage_core::entities::User;
use engage_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            full_name: model.full_name,
            is_active: model.is_active,
            followers_count: model.followers_count,
            following_count: model.following_count,
            posts_count: model.posts_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
