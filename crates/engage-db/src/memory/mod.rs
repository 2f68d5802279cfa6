//! In-memory repository implementations
//!
//! Backed by `parking_lot::RwLock` over plain collections. Used by the
//! service tests and by local development without a database. Lock scopes
//! are kept short and never held across awaits.

mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod share;
mod user;

pub use comment::MemCommentRepository;
pub use follow::MemFollowRepository;
pub use like::MemLikeRepository;
pub use notification::MemNotificationRepository;
pub use post::MemPostRepository;
pub use share::MemShareRepository;
pub use user::MemUserRepository;
