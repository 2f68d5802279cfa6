//! PostgreSQL repository implementations

mod comment;
mod error;
mod follow;
mod like;
mod notification;
mod post;
mod share;
mod user;

pub use comment::PgCommentRepository;
pub use error::{map_db_error, map_unique_violation};
pub use follow::PgFollowRepository;
pub use like::PgLikeRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use share::PgShareRepository;
pub use user::PgUserRepository;
