//! Shop, cart and order history handlers.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::{flash_redirect, recover, render, Flashed, Page};
use crate::api::extractors::{parse_id, EntityId};
use crate::api::flash::{self, FlashLevel};
use crate::api::middleware::CurrentUser;
use crate::api::views::{CartPage, Layout, OrdersPage, SelectOption, ShopPage};
use crate::api::AppState;
use crate::config::ALL_CATEGORIES;
use crate::domain::{AddOutcome, AdjustOutcome, CartAction, CheckoutOutcome};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Create shop routes
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/shop", get(shop))
        .route("/add_to_cart/:id", post(add_to_cart))
        .route("/cart", get(cart))
        .route("/update_cart/:id/:action", post(update_cart))
        .route("/checkout", post(checkout))
        .route("/orders", get(orders))
}

pub async fn shop(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Page> {
    let category = query
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    let (products, categories) = tokio::try_join!(
        state.shop_service.list_products(&category),
        state.shop_service.categories(),
    )?;

    let mut options = vec![SelectOption::new(ALL_CATEGORIES, "All Products", &category)];
    options.extend(
        categories
            .iter()
            .map(|name| SelectOption::new(name, name, &category)),
    );

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        ShopPage {
            layout: Layout::new(Some(&current), flashes),
            products: products.into_iter().map(Into::into).collect(),
            categories: options,
            is_all: category == ALL_CATEGORIES,
        },
    )
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    EntityId(product_id): EntityId,
) -> AppResult<Flashed> {
    let (level, text) = match state.shop_service.add_to_cart(current.id, product_id).await? {
        AddOutcome::Added { product } => {
            (FlashLevel::Success, format!("{} added to cart!", product.name))
        }
        AddOutcome::Incremented { product, .. } => (
            FlashLevel::Success,
            format!("Added another {} to cart!", product.name),
        ),
        AddOutcome::OutOfStock { .. } => {
            (FlashLevel::Danger, "This product is out of stock!".to_string())
        }
    };

    Ok(flash_redirect(jar, level, text, "/shop"))
}

pub async fn cart(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Page> {
    let cart = state.shop_service.cart(current.id).await?;

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        CartPage {
            layout: Layout::new(Some(&current), flashes),
            total: cart.total.to_string(),
            items: cart.lines.into_iter().map(Into::into).collect(),
        },
    )
}

pub async fn update_cart(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    Path((order_id, action)): Path<(String, String)>,
) -> AppResult<Flashed> {
    let order_id = parse_id(&order_id)?;
    let Some(action) = CartAction::parse(&action) else {
        return recover(jar, AppError::BadRequest(action), "/cart");
    };

    match state
        .shop_service
        .adjust_cart(current.id, order_id, action)
        .await
    {
        Ok(AdjustOutcome::Updated { .. }) => Ok(flash_redirect(
            jar,
            FlashLevel::Success,
            "Cart updated!",
            "/cart",
        )),
        Ok(AdjustOutcome::Removed) => Ok(flash_redirect(
            jar,
            FlashLevel::Info,
            "Item removed from cart.",
            "/cart",
        )),
        Err(e) => recover(jar, e, "/cart"),
    }
}

pub async fn checkout(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Flashed> {
    match state.shop_service.checkout(current.id).await? {
        CheckoutOutcome::EmptyCart => Ok(flash_redirect(
            jar,
            FlashLevel::Warning,
            "Your cart is empty!",
            "/shop",
        )),
        CheckoutOutcome::Placed { .. } => Ok(flash_redirect(
            jar,
            FlashLevel::Success,
            "Order placed successfully!",
            "/orders",
        )),
    }
}

pub async fn orders(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Page> {
    let history = state.shop_service.order_history(current.id).await?;

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        OrdersPage {
            layout: Layout::new(Some(&current), flashes),
            orders: history.into_iter().map(Into::into).collect(),
        },
    )
}
