//! Test helpers for integration tests
//!
//! Spawns the API server over in-memory storage and provides an HTTP
//! client that speaks the gateway identity header.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use engage_api::{create_app_state_memory, create_app_unlimited};
use engage_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, EngineConfig, Environment,
    RateLimitConfig, ServerConfig, SnowflakeConfig,
};
use engage_service::ServiceContext;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Direct handle to the backing context for seeding fixtures
    pub ctx: ServiceContext,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server over fresh in-memory repositories
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state_memory(config)?;
        let ctx = state.service_context().clone();
        let app = create_app_unlimited(state);

        // port 0: let the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for the server to accept connections
        tokio::time::sleep(Duration::from_millis(50)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            ctx,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// GET without identity header
    pub async fn get_anon(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// GET as a user
    pub async fn get(&self, path: &str, user_id: i64) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("X-User-Id", user_id.to_string())
            .send()
            .await?)
    }

    /// POST with JSON body as a user
    pub async fn post<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("X-User-Id", user_id.to_string())
            .json(body)
            .send()
            .await?)
    }

    /// POST without a body as a user
    pub async fn post_empty(&self, path: &str, user_id: i64) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("X-User-Id", user_id.to_string())
            .send()
            .await?)
    }

    /// PUT without a body as a user
    pub async fn put(&self, path: &str, user_id: i64) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .header("X-User-Id", user_id.to_string())
            .send()
            .await?)
    }

    /// DELETE as a user
    pub async fn delete(&self, path: &str, user_id: i64) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header("X-User-Id", user_id.to_string())
            .send()
            .await?)
    }
}

/// Build a self-contained test configuration (no environment reads)
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "engage-server-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 1,
        },
        engine: EngineConfig::default(),
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 0 },
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
