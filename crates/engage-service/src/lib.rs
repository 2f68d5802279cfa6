//! # engage-service
//!
//! Application layer: counter resync, the notification engine, trending
//! ranking, and the social-action orchestration the API calls into.

pub mod dto;
pub mod services;

pub use services::{
    CounterService, FanOutReport, NewNotification, NotificationService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SocialService, TrendingService,
    MIN_RETENTION_DAYS,
};
