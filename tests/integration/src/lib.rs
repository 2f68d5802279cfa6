//! Integration test utilities for the engagement engine
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API over in-memory storage.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
