//! Shop service - Catalog browsing and the cart/order lifecycle.
//!
//! Cart rows are only ever mutated inside a transaction. Adding a product
//! increments the existing cart row when there is one; if two requests race
//! to create the row, the partial unique index rejects the loser, which then
//! increments the winner's row instead.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::config::{ALL_CATEGORIES, DASHBOARD_RECENT_ORDERS};
use crate::domain::{
    compute_total, AddOutcome, AdjustOutcome, CartAction, CheckoutOutcome, Money, OrderLine,
    Product, QuantityChange,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// The user's cart with its total.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<OrderLine>,
    pub total: Money,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[async_trait]
pub trait ShopService: Send + Sync {
    /// In-stock products; `"all"` or blank selects every category
    async fn list_products(&self, category: &str) -> AppResult<Vec<Product>>;

    /// Distinct product categories
    async fn categories(&self) -> AppResult<Vec<String>>;

    /// Add one unit of a product to the user's cart
    async fn add_to_cart(&self, user_id: Uuid, product_id: Uuid) -> AppResult<AddOutcome>;

    /// Change one of the user's cart rows
    async fn adjust_cart(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        action: CartAction,
    ) -> AppResult<AdjustOutcome>;

    /// Current cart contents and total
    async fn cart(&self, user_id: Uuid) -> AppResult<CartView>;

    /// Place every cart row as an order
    async fn checkout(&self, user_id: Uuid) -> AppResult<CheckoutOutcome>;

    /// Placed orders, most recent first
    async fn order_history(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>>;

    /// The few most recent placed orders
    async fn recent_orders(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>>;
}

/// Concrete implementation of ShopService using Unit of Work.
pub struct ShopManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ShopManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ShopService for ShopManager<U> {
    async fn list_products(&self, category: &str) -> AppResult<Vec<Product>> {
        let category = category.trim();
        let filter = (!category.is_empty() && category != ALL_CATEGORIES)
            .then(|| category.to_string());

        self.uow.products().list_in_stock(filter).await
    }

    async fn categories(&self) -> AppResult<Vec<String>> {
        self.uow.products().categories().await
    }

    async fn add_to_cart(&self, user_id: Uuid, product_id: Uuid) -> AppResult<AddOutcome> {
        let product = self
            .uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        if !product.in_stock {
            return Ok(AddOutcome::OutOfStock { product });
        }

        let incremented = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let orders = ctx.orders();

                    if let Some(existing) = orders.find_cart_row(user_id, product_id).await? {
                        return Ok(Some(orders.increment(existing.id).await?));
                    }

                    if orders.insert_cart_row(user_id, product_id).await?.is_some() {
                        return Ok(None);
                    }

                    // Lost the insert race; the row exists now
                    let existing = orders
                        .find_cart_row(user_id, product_id)
                        .await?
                        .ok_or_not_found()?;
                    Ok(Some(orders.increment(existing.id).await?))
                })
            })
            .await?;

        Ok(match incremented {
            Some(quantity) => AddOutcome::Incremented { product, quantity },
            None => AddOutcome::Added { product },
        })
    }

    async fn adjust_cart(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        action: CartAction,
    ) -> AppResult<AdjustOutcome> {
        with_transaction!(self.uow, |ctx| {
            let orders = ctx.orders();
            let order = orders.find_by_id(order_id).await?.ok_or_not_found()?;

            if !order.is_owned_by(user_id) || !order.status.is_mutable() {
                tracing::warn!(%user_id, %order_id, "Rejected cart change on foreign or placed order");
                return Err(AppError::Forbidden);
            }

            match action.apply(order.quantity) {
                QuantityChange::Set(quantity) => {
                    orders.set_quantity(order.id, quantity).await?;
                    Ok(AdjustOutcome::Updated { quantity })
                }
                QuantityChange::Delete => {
                    orders.delete(order.id).await?;
                    Ok(AdjustOutcome::Removed)
                }
            }
        })
    }

    async fn cart(&self, user_id: Uuid) -> AppResult<CartView> {
        let lines = self.uow.orders().cart_lines(user_id).await?;
        let total = compute_total(&lines);
        Ok(CartView { lines, total })
    }

    async fn checkout(&self, user_id: Uuid) -> AppResult<CheckoutOutcome> {
        // Total and status change share one snapshot
        let placed = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let orders = ctx.orders();
                    let lines = orders.cart_lines(user_id).await?;
                    if lines.is_empty() {
                        return Ok(None);
                    }

                    let placed = orders.place_cart(user_id, Utc::now()).await?;
                    Ok(Some((placed, compute_total(&lines))))
                })
            })
            .await?;

        let Some((items, total)) = placed.filter(|(items, _)| *items > 0) else {
            return Ok(CheckoutOutcome::EmptyCart);
        };

        tracing::info!(%user_id, items, total = %total, "Order placed");
        Ok(CheckoutOutcome::Placed {
            items: items as usize,
            total,
        })
    }

    async fn order_history(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>> {
        self.uow.orders().history(user_id, None).await
    }

    async fn recent_orders(&self, user_id: Uuid) -> AppResult<Vec<OrderLine>> {
        self.uow
            .orders()
            .history(user_id, Some(DASHBOARD_RECENT_ORDERS))
            .await
    }
}
