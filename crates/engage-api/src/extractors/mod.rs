//! Axum extractors for request handling
//!
//! Custom extractors for identity, validation, and pagination.

mod identity;
mod pagination;
mod validated;

pub use identity::{Identity, USER_ID_HEADER};
pub use pagination::{PageParams, Pagination};
pub use validated::ValidatedJson;
