//! Service layer

mod context;
mod counters;
mod error;
mod notification;
mod social;
#[cfg(test)]
pub(crate) mod testing;
mod trending;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use counters::CounterService;
pub use error::{ServiceError, ServiceResult};
pub use notification::{FanOutReport, NewNotification, NotificationService, MIN_RETENTION_DAYS};
pub use social::SocialService;
pub use trending::TrendingService;
