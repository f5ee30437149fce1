//! Common test utilities for integration tests.
//!
//! These tests run against a real PostgreSQL instance and are skipped when
//! `TEST_DATABASE_URL` is not set. The tables are truncated per test, so a
//! process-wide lock serializes tests within the binary.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use persistence::db::{DatabaseConfig, Environment};
use persistence::repositories::AdminSettingsRepository;
use powerline_admin_api::app::create_app;
use powerline_admin_api::config::{
    AdminConfig, Config, LoggingConfig, SecurityConfig, ServerConfig,
};
use powerline_admin_api::services::AdminAuthService;

/// Passcode provisioned for every test run.
pub const TEST_PASSCODE: &str = "powerline-test-passcode";

static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// One connected, migrated, truncated test environment.
pub struct TestCtx {
    pub app: Router,
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

/// Connects to the test database and builds a fresh app over it.
///
/// Returns `None` (test should return early) when `TEST_DATABASE_URL` is
/// not set.
pub async fn setup() -> Option<TestCtx> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set - skipping integration test");
            return None;
        }
    };

    let guard = DB_LOCK.lock().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../persistence/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE contacts, quotes")
        .execute(&pool)
        .await
        .expect("Failed to truncate submission tables");
    sqlx::query("DELETE FROM admin_settings")
        .execute(&pool)
        .await
        .expect("Failed to clear admin settings");

    AdminAuthService::new(AdminSettingsRepository::new(pool.clone()))
        .provision(TEST_PASSCODE)
        .await
        .expect("Failed to provision test credential");

    let app = create_app(test_config(url), pool.clone());

    Some(TestCtx {
        app,
        pool,
        _guard: guard,
    })
}

/// Configuration for tests: permissive CORS, rate limiting off so repeated
/// login attempts in one run are not throttled.
pub fn test_config(database_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: database_url,
            environment: Environment::Development,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            cors_origins: vec![],
            auth_rate_limit_per_minute: 0,
        },
        admin: AdminConfig {
            initial_passcode: TEST_PASSCODE.to_string(),
        },
    }
}

/// Builds a JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Builds a bodyless request.
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parses a JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Sends one request through a clone of the router and returns status + body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    (status, body)
}
