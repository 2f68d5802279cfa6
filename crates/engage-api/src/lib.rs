//! # engage-api
//!
//! REST API server built with Axum framework.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{
    create_app, create_app_state, create_app_state_memory, create_app_unlimited, run, run_server,
};
