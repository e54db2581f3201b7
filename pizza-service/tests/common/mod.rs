//! Common test utilities for pizza-service integration tests.
#![allow(dead_code)]

use pizza_service::config::{DatabaseConfig, PizzaConfig};
use pizza_service::services::Database;
use pizza_service::startup::Application;
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,pizza_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Test application wrapper around a seeded, file-backed SQLite store.
pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub db: Database,
    pub client: reqwest::Client,
    // Keeps the database file alive for the duration of the test.
    _data_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        init_tracing();

        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!("sqlite://{}", data_dir.path().join("test.db").display());

        let config = PizzaConfig {
            common: CommonConfig { port: 0 },
            service_name: "pizza-service-test".to_string(),
            service_version: "test".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            database: DatabaseConfig {
                url: database_url,
                max_connections: 4,
                min_connections: 1,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");

        let db = app.db().clone();
        db.seed().await.expect("Failed to seed database");

        let http_port = app.http_port();
        let address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            http_port,
            db,
            client,
            _data_dir: data_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Row count of a table, read straight from storage.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows")
    }
}
