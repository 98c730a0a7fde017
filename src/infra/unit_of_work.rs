//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle. Every
//! multi-statement cart mutation runs inside [`UnitOfWork::transaction`] or
//! [`UnitOfWork::transaction_serializable`] so it either fully applies or
//! leaves no trace.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, IsolationLevel, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::entities::order::{self, Entity as OrderEntity};
use super::repositories::entities::product::Entity as ProductEntity;
use super::repositories::{
    into_lines, ForumRepository, ForumStore, OrderRepository, OrderStore, ProductRepository, ProductStore,
    UserRepository, UserStore,
};
use crate::domain::{Order, OrderLine, OrderStatus};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transactional closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods; mock
/// the repositories instead or run against an in-memory database.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn orders(&self) -> Arc<dyn OrderRepository>;

    fn forum(&self) -> Arc<dyn ForumRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error. Uses ReadCommitted where
    /// the backend supports isolation levels.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a serializable transaction.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Order operations for this transaction
    pub fn orders(&self) -> TxOrderRepository<'_> {
        TxOrderRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    product_repo: Arc<ProductStore>,
    order_repo: Arc<OrderStore>,
    forum_repo: Arc<ForumStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            order_repo: Arc::new(OrderStore::new(db.clone())),
            forum_repo: Arc::new(ForumStore::new(db.clone())),
            db,
        }
    }

    async fn begin(&self, isolation: IsolationLevel) -> Result<DatabaseTransaction, DbErr> {
        // SQLite transactions are always serializable and reject the hint
        if self.db.get_database_backend() == DatabaseBackend::Sqlite {
            return self.db.begin().await;
        }
        self.db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.begin(isolation).await.map_err(AppError::from)?;
        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    fn forum(&self) -> Arc<dyn ForumRepository> {
        self.forum_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware order repository.
pub struct TxOrderRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOrderRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find an order row by ID, whatever its status
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let result = OrderEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(Order::from))
    }

    /// The user's cart rows with their products, as seen by this transaction
    pub async fn cart_lines(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>> {
        let rows = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .find_also_related(ProductEntity)
            .all(self.txn)
            .await?;

        Ok(into_lines(rows))
    }

    /// The user's cart row for a product, if one exists
    pub async fn find_cart_row(&self, user_id: Uuid, product_id: Uuid) -> AppResult<Option<Order>> {
        let result = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::ProductId.eq(product_id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .one(self.txn)
            .await?;

        Ok(result.map(Order::from))
    }

    /// Add one to a cart row in a single statement and return the new quantity.
    pub async fn increment(&self, id: Uuid) -> AppResult<i32> {
        OrderEntity::update_many()
            .col_expr(
                order::Column::Quantity,
                Expr::col(order::Column::Quantity).add(1),
            )
            .filter(order::Column::Id.eq(id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .exec(self.txn)
            .await?;

        let model = OrderEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(model.quantity)
    }

    /// Insert a fresh cart row with quantity 1.
    ///
    /// Returns `Ok(None)` when a concurrent request already created the row
    /// and the partial unique index rejected this one. The insert runs in a
    /// savepoint so the outer transaction stays usable after the violation.
    pub async fn insert_cart_row(&self, user_id: Uuid, product_id: Uuid) -> AppResult<Option<Order>> {
        let savepoint = self.txn.begin().await?;

        let inserted = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            product_id: Set(product_id),
            quantity: Set(1),
            status: Set(OrderStatus::Cart.as_str().to_string()),
            order_date: Set(Utc::now()),
        }
        .insert(&savepoint)
        .await;

        match inserted {
            Ok(model) => {
                savepoint.commit().await?;
                Ok(Some(Order::from(model)))
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                savepoint.rollback().await?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the quantity of a cart row
    pub async fn set_quantity(&self, id: Uuid, quantity: i32) -> AppResult<()> {
        let result = OrderEntity::update_many()
            .col_expr(order::Column::Quantity, Expr::value(quantity))
            .filter(order::Column::Id.eq(id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Delete a cart row
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = OrderEntity::delete_many()
            .filter(order::Column::Id.eq(id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Move every cart row of the user to `Ordered`, stamped with `placed_at`.
    pub async fn place_cart(&self, user_id: Uuid, placed_at: DateTime<Utc>) -> AppResult<u64> {
        let result = OrderEntity::update_many()
            .col_expr(
                order::Column::Status,
                Expr::value(OrderStatus::Ordered.as_str()),
            )
            .col_expr(order::Column::OrderDate, Expr::value(placed_at))
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::Status.eq(OrderStatus::Cart.as_str()))
            .exec(self.txn)
            .await?;

        Ok(result.rows_affected)
    }
}

/// Run a block inside a transaction.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;

    async fn persistence() -> Persistence {
        let db = Database::connect_url("sqlite::memory:").await.unwrap();
        db.run_migrations().await.unwrap();
        Persistence::new(db.get_connection())
    }

    #[tokio::test]
    async fn test_transaction_commits_result() {
        let uow = persistence().await;

        let placed = uow
            .transaction_serializable(|ctx| {
                Box::pin(async move { ctx.orders().place_cart(Uuid::new_v4(), Utc::now()).await })
            })
            .await
            .unwrap();

        assert_eq!(placed, 0);
    }

    #[tokio::test]
    async fn test_transaction_returns_closure_error() {
        let uow = persistence().await;

        let result: AppResult<()> = uow
            .transaction(|_ctx| Box::pin(async move { Err(AppError::Forbidden) }))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
