//! User service - Profile reads and updates.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{is_supported_language, DEFAULT_LANGUAGE};
use crate::domain::{ProfileUpdate, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Replace the editable profile fields
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> AppResult<User>;

    /// Flip the weather alert subscription, returning the new state
    async fn toggle_weather_alerts(&self, id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Trim optional text, mapping blank input to `None`.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> AppResult<User> {
        let language = match update.language.trim() {
            "" => DEFAULT_LANGUAGE.to_string(),
            code if is_supported_language(code) => code.to_string(),
            code => {
                return Err(AppError::validation(format!(
                    "Unsupported language: {}",
                    code
                )))
            }
        };

        if matches!(update.farm_size, Some(size) if !size.is_finite() || size < 0.0) {
            return Err(AppError::validation("Farm size must be a positive number"));
        }

        let update = ProfileUpdate {
            farm_location: clean(update.farm_location),
            farm_size: update.farm_size,
            crops: clean(update.crops),
            phone: clean(update.phone),
            soil_type: clean(update.soil_type),
            language,
        };

        self.uow.users().update_profile(id, update).await
    }

    async fn toggle_weather_alerts(&self, id: Uuid) -> AppResult<bool> {
        let users = self.uow.users();
        let user = users.find_by_id(id).await?.ok_or_not_found()?;
        let updated = users.set_weather_alerts(id, !user.weather_alerts).await?;

        tracing::info!(user_id = %id, enabled = updated.weather_alerts, "Weather alerts toggled");
        Ok(updated.weather_alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MockForumRepository, MockOrderRepository, MockProductRepository, MockUserRepository,
        ForumRepository, OrderRepository, ProductRepository, TransactionContext, TxFuture,
        UserRepository,
    };
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn create_test_user(id: Uuid) -> User {
        User {
            id,
            username: "ravi".to_string(),
            email: "ravi@example.com".to_string(),
            password_hash: "hashed".to_string(),
            farm_location: None,
            farm_size: None,
            crops: None,
            phone: None,
            language: DEFAULT_LANGUAGE.to_string(),
            soil_type: None,
            weather_alerts: false,
            created_at: Utc::now(),
        }
    }

    /// Test double for UnitOfWork that wraps a MockUserRepository
    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
    }

    impl TestUnitOfWork {
        fn new(user_repo: MockUserRepository) -> Self {
            Self {
                user_repo: Arc::new(user_repo),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        fn products(&self) -> Arc<dyn ProductRepository> {
            Arc::new(MockProductRepository::new())
        }

        fn orders(&self) -> Arc<dyn OrderRepository> {
            Arc::new(MockOrderRepository::new())
        }

        fn forum(&self) -> Arc<dyn ForumRepository> {
            Arc::new(MockForumRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test double"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test double"))
        }
    }

    fn blank_update(language: &str) -> ProfileUpdate {
        ProfileUpdate {
            farm_location: None,
            farm_size: None,
            crops: None,
            phone: None,
            soil_type: None,
            language: language.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let result = service.get_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_profile_cleans_input() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_update_profile()
            .with(eq(user_id), always())
            .times(1)
            .returning(|id, update| {
                assert_eq!(update.language, "en");
                assert_eq!(update.farm_location.as_deref(), Some("Nashik,IN"));
                assert_eq!(update.phone, None);
                Ok(create_test_user(id))
            });

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let update = ProfileUpdate {
            farm_location: Some("  Nashik,IN ".to_string()),
            phone: Some("   ".to_string()),
            ..blank_update("")
        };

        assert!(service.update_profile(user_id, update).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_rejects_unknown_language() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().never();

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let result = service
            .update_profile(Uuid::new_v4(), blank_update("fr"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_negative_farm_size() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().never();

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let update = ProfileUpdate {
            farm_size: Some(-1.0),
            ..blank_update("en")
        };

        let result = service.update_profile(Uuid::new_v4(), update).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_non_finite_farm_size() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().never();

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        for size in [f64::NAN, f64::INFINITY] {
            let update = ProfileUpdate {
                farm_size: Some(size),
                ..blank_update("en")
            };
            let result = service.update_profile(Uuid::new_v4(), update).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_toggle_weather_alerts_flips_flag() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_set_weather_alerts()
            .with(eq(user_id), eq(true))
            .times(1)
            .returning(|id, enabled| {
                let mut user = create_test_user(id);
                user.weather_alerts = enabled;
                Ok(user)
            });

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        assert!(service.toggle_weather_alerts(user_id).await.unwrap());
    }
}
