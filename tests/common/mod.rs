//! Shared fixtures for integration tests.
//!
//! Every test gets its own in-memory SQLite database with the real
//! migrations and product catalog applied.

#![allow(dead_code)]

use std::sync::Arc;

use kisan_hub::api::{create_router, AppState};
use kisan_hub::config::Config;
use kisan_hub::domain::{NewUser, Product, User};
use kisan_hub::infra::Database;
use kisan_hub::services::{ServiceContainer, Services, WeatherReporter};
use sea_orm::ConnectionTrait;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const TEST_PASSWORD: &str = "harvest-2024";

pub struct TestApp {
    pub db: Arc<Database>,
    pub services: Services,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_url("sqlite::memory:").await
    }

    /// A file-backed database with a real connection pool, for tests that
    /// need requests to overlap. Keep the directory alive for the test.
    pub async fn on_disk() -> (Self, TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("kisan.db").display());
        (Self::with_url(&url).await, dir)
    }

    async fn with_url(url: &str) -> Self {
        let db = Database::connect_url(url).await.expect("database");
        db.run_migrations().await.expect("migrations");
        db.seed().await.expect("seed");

        let config = Config::new("sqlite::memory:", TEST_SECRET).expect("config");
        let services = Services::with_weather(
            db.get_connection(),
            config,
            Arc::new(WeatherReporter::new(None)),
        );

        Self {
            db: Arc::new(db),
            services,
        }
    }

    pub fn router(&self) -> axum::Router {
        create_router(AppState::from_services(&self.services, self.db.clone()))
    }

    pub async fn register(&self, username: &str) -> User {
        self.services
            .auth()
            .register(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: TEST_PASSWORD.to_string(),
                confirm_password: TEST_PASSWORD.to_string(),
            })
            .await
            .expect("registration")
    }

    pub async fn product(&self, name: &str) -> Product {
        self.services
            .shop()
            .list_products("all")
            .await
            .expect("catalog")
            .into_iter()
            .find(|p| p.name == name)
            .expect("seeded product")
    }

    pub async fn mark_out_of_stock(&self, name: &str) {
        self.db
            .connection()
            .execute_unprepared(&format!(
                "UPDATE products SET in_stock = 0 WHERE name = '{}'",
                name
            ))
            .await
            .expect("stock update");
    }
}
