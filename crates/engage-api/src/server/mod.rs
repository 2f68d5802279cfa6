//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use engage_common::{AppConfig, AppError};
use engage_core::SnowflakeGenerator;
use engage_db::{
    create_pool, MemCommentRepository, MemFollowRepository, MemLikeRepository,
    MemNotificationRepository, MemPostRepository, MemShareRepository, MemUserRepository,
    PgCommentRepository, PgFollowRepository, PgLikeRepository, PgNotificationRepository,
    PgPostRepository, PgShareRepository, PgUserRepository,
};
use engage_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // health bypasses rate limiting
    let health = apply_middleware(health_routes());
    router.merge(health).with_state(state)
}

/// Build the application without rate limiting (tests, local development)
pub fn create_app_unlimited(state: AppState) -> Router {
    let router = apply_middleware(create_router().merge(health_routes()));
    router.with_state(state)
}

/// Initialize all dependencies backed by PostgreSQL and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = engage_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .share_repo(Arc::new(PgShareRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool)))
        .snowflake_generator(snowflake_generator)
        .engine(config.engine.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Create AppState over fresh in-memory repositories (tests, local
/// development without PostgreSQL)
pub fn create_app_state_memory(config: AppConfig) -> Result<AppState, AppError> {
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(MemUserRepository::new()))
        .follow_repo(Arc::new(MemFollowRepository::new()))
        .post_repo(Arc::new(MemPostRepository::new()))
        .like_repo(Arc::new(MemLikeRepository::new()))
        .comment_repo(Arc::new(MemCommentRepository::new()))
        .share_repo(Arc::new(MemShareRepository::new()))
        .notification_repo(Arc::new(MemNotificationRepository::new()))
        .snowflake_generator(snowflake_generator)
        .engine(config.engine.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
