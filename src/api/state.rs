//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, ForumService, ServiceContainer, Services, ShopService, UserService,
    WeatherService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and session checks
    pub auth_service: Arc<dyn AuthService>,
    /// Profile reads and updates
    pub user_service: Arc<dyn UserService>,
    /// Catalog, cart and orders
    pub shop_service: Arc<dyn ShopService>,
    pub forum_service: Arc<dyn ForumService>,
    pub weather_service: Arc<dyn WeatherService>,
    /// Database connection, used for health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::from_services(&services, database)
    }

    /// Create application state from an already wired container.
    pub fn from_services(services: &impl ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            shop_service: services.shop(),
            forum_service: services.forum(),
            weather_service: services.weather(),
            database,
        }
    }
}
