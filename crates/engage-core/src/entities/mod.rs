//! Domain entities

mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod share;
mod trending;
mod user;

pub use comment::Comment;
pub use follow::Follow;
pub use like::Like;
pub use notification::{Notification, NotificationKind};
pub use post::{Post, PostCounters};
pub use share::Share;
pub use trending::TrendingScore;
pub use user::{User, UserCounters};
