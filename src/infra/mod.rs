//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - The live weather provider client
//! - Server-side session registry
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod session;
pub mod unit_of_work;
pub mod weather;

pub use db::{Database, Migrator};
pub use repositories::{
    ForumRepository, ForumStore, OrderRepository, OrderStore, ProductRepository, ProductStore,
    UserRepository, UserStore,
};
pub use session::{SessionRecord, SessionStore};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, TxOrderRepository, UnitOfWork};
pub use weather::{OpenWeatherClient, WeatherError, WeatherSource};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockForumRepository, MockOrderRepository, MockProductRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use weather::MockWeatherSource;
