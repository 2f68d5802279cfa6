//! Post entity <-> model mapper

use engage_core::entities::Post;
use engage_core::value_objects::Snowflake;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            shares_count: model.shares_count,
            created_at: model.created_at,
        }
    }
}
