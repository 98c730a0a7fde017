//! Product catalog queries.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::product::{self, Entity as ProductEntity};
use crate::domain::Product;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to the shop catalog.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// In-stock products, optionally restricted to one category, by name
    async fn list_in_stock(&self, category: Option<String>) -> AppResult<Vec<Product>>;

    /// Distinct categories across the catalog, sorted
    async fn categories(&self) -> AppResult<Vec<String>>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn list_in_stock(&self, category: Option<String>) -> AppResult<Vec<Product>> {
        let mut query = ProductEntity::find().filter(product::Column::InStock.eq(true));
        if let Some(category) = category {
            query = query.filter(product::Column::Category.eq(category));
        }

        let models = query
            .order_by_asc(product::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn categories(&self) -> AppResult<Vec<String>> {
        let categories = ProductEntity::find()
            .select_only()
            .column(product::Column::Category)
            .distinct()
            .order_by_asc(product::Column::Category)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(categories)
    }
}
