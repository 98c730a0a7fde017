//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All database-backed services share one Unit of Work for repository
//! access and transaction management.

mod auth_service;
pub mod container;
mod forum_service;
mod shop_service;
mod user_service;
mod weather_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, SessionToken};
pub use forum_service::{ForumManager, ForumService};
pub use shop_service::{CartView, ShopManager, ShopService};
pub use user_service::{UserManager, UserService};
pub use weather_service::{WeatherOutlook, WeatherReporter, WeatherService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
