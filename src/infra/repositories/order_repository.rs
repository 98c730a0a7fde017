//! Order read model: carts and order history joined with their products.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::order::{self, Entity as OrderEntity};
use super::entities::product::{self, Entity as ProductEntity};
use crate::domain::{Order, OrderLine, OrderStatus, Product};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to order rows. Mutations go through a transaction context.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order row by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// The user's cart rows, oldest first
    async fn cart_lines(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>>;

    /// The user's non-cart rows, most recent first, optionally capped
    async fn history(&self, user_id: Uuid, limit: Option<u64>) -> AppResult<Vec<OrderLine>>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Pair each order with its product, skipping orphans.
pub(crate) fn into_lines(rows: Vec<(order::Model, Option<product::Model>)>) -> Vec<OrderLine> {
    rows.into_iter()
        .filter_map(|(order, product)| {
            product.map(|product| OrderLine {
                order: Order::from(order),
                product: Product::from(product),
            })
        })
        .collect()
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let result = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Order::from))
    }

    async fn cart_lines(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>> {
        let rows = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .find_also_related(ProductEntity)
            .order_by_asc(order::Column::OrderDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(into_lines(rows))
    }

    async fn history(&self, user_id: Uuid, limit: Option<u64>) -> AppResult<Vec<OrderLine>> {
        let rows = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::Status.ne(OrderStatus::Cart.as_str()))
            .find_also_related(ProductEntity)
            .order_by_desc(order::Column::OrderDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(into_lines(rows))
    }
}
