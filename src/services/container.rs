//! Service Container - Centralized service access.
//!
//! Wires every service to one shared Unit of Work and hands them out as
//! trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, ForumManager, ForumService, ShopManager, ShopService,
    UserManager, UserService, WeatherReporter, WeatherService,
};
use crate::config::Config;
use crate::infra::{Persistence, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn shop(&self) -> Arc<dyn ShopService>;

    fn forum(&self) -> Arc<dyn ForumService>;

    fn weather(&self) -> Arc<dyn WeatherService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    shop_service: Arc<dyn ShopService>,
    forum_service: Arc<dyn ForumService>,
    weather_service: Arc<dyn WeatherService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        shop_service: Arc<dyn ShopService>,
        forum_service: Arc<dyn ForumService>,
        weather_service: Arc<dyn WeatherService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            shop_service,
            forum_service,
            weather_service,
        }
    }

    /// Build every service from a database connection and config.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let weather = Arc::new(WeatherReporter::from_config(&config));
        Self::with_weather(db, config, weather)
    }

    /// Like [`Services::from_connection`] with an explicit weather service.
    pub fn with_weather(
        db: sea_orm::DatabaseConnection,
        config: Config,
        weather_service: Arc<dyn WeatherService>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(
                uow.clone(),
                config,
                SessionStore::new(),
            )),
            user_service: Arc::new(UserManager::new(uow.clone())),
            shop_service: Arc::new(ShopManager::new(uow.clone())),
            forum_service: Arc::new(ForumManager::new(uow)),
            weather_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn shop(&self) -> Arc<dyn ShopService> {
        self.shop_service.clone()
    }

    fn forum(&self) -> Arc<dyn ForumService> {
        self.forum_service.clone()
    }

    fn weather(&self) -> Arc<dyn WeatherService> {
        self.weather_service.clone()
    }
}
