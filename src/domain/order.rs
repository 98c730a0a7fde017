//! Order lines and the cart lifecycle.
//!
//! An order row is a single (user, product, quantity) line. While its status
//! is [`OrderStatus::Cart`] it is still an editable selection; checkout moves
//! every cart row of a user to [`OrderStatus::Ordered`], after which the row
//! is history and never changes again.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Money, Product};

pub const STATUS_CART: &str = "Cart";
pub const STATUS_ORDERED: &str = "Ordered";
pub const STATUS_PENDING: &str = "Pending";

/// Lifecycle state of an order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    Cart,
    Ordered,
    Pending,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Cart => STATUS_CART,
            OrderStatus::Ordered => STATUS_ORDERED,
            OrderStatus::Pending => STATUS_PENDING,
        }
    }

    /// Only cart rows may have their quantity changed or be deleted.
    pub fn is_mutable(&self) -> bool {
        matches!(self, OrderStatus::Cart)
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_CART => OrderStatus::Cart,
            STATUS_ORDERED => OrderStatus::Ordered,
            _ => OrderStatus::Pending,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub status: OrderStatus,
    /// Set on creation, refreshed at checkout
    pub order_date: DateTime<Utc>,
}

impl Order {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// An order row joined with the product it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub order: Order,
    pub product: Product,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.product.price * self.order.quantity
    }
}

/// Sum of price x quantity over the lines. An empty cart totals zero.
pub fn compute_total(lines: &[OrderLine]) -> Money {
    lines.iter().map(OrderLine::line_total).sum()
}

/// Requested change to a cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increase,
    Decrease,
    Remove,
}

/// What a [`CartAction`] does to a row of a given quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Set(i32),
    Delete,
}

impl CartAction {
    /// Parse the action segment of a cart update URL.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "increase" => Some(CartAction::Increase),
            "decrease" => Some(CartAction::Decrease),
            "remove" => Some(CartAction::Remove),
            _ => None,
        }
    }

    /// Resulting change for a row currently at `quantity`. A row never
    /// drops to zero; it is deleted instead.
    pub fn apply(self, quantity: i32) -> QuantityChange {
        match self {
            CartAction::Increase => QuantityChange::Set(quantity.saturating_add(1)),
            CartAction::Decrease if quantity > 1 => QuantityChange::Set(quantity - 1),
            CartAction::Decrease | CartAction::Remove => QuantityChange::Delete,
        }
    }
}

/// Result of adding a product to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A new cart row was created with quantity 1
    Added { product: Product },
    /// The existing cart row was incremented
    Incremented { product: Product, quantity: i32 },
    /// The product is not in stock; nothing changed
    OutOfStock { product: Product },
}

/// Result of adjusting a cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    Updated { quantity: i32 },
    Removed,
}

/// Result of checking out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing to place; no rows changed
    EmptyCart,
    /// Every cart row moved to `Ordered`
    Placed { items: usize, total: Money },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: i32) -> OrderLine {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Organic Compost".to_string(),
            description: String::new(),
            price: Money::from_rupees(price),
            image: "compost.jpg".to_string(),
            category: "Organic".to_string(),
            in_stock: true,
        };
        OrderLine {
            order: Order {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                product_id: product.id,
                quantity,
                status: OrderStatus::Cart,
                order_date: Utc::now(),
            },
            product,
        }
    }

    #[test]
    fn test_compute_total() {
        let lines = vec![line(499, 1), line(349, 2)];
        assert_eq!(compute_total(&lines), Money::from_rupees(1197));
    }

    #[test]
    fn test_compute_total_empty_is_zero() {
        assert_eq!(compute_total(&[]), Money::ZERO);
    }

    #[test]
    fn test_decrease_at_one_deletes() {
        assert_eq!(CartAction::Decrease.apply(1), QuantityChange::Delete);
        assert_eq!(CartAction::Decrease.apply(3), QuantityChange::Set(2));
    }

    #[test]
    fn test_increase_and_remove() {
        assert_eq!(CartAction::Increase.apply(1), QuantityChange::Set(2));
        assert_eq!(CartAction::Remove.apply(7), QuantityChange::Delete);
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(CartAction::parse("increase"), Some(CartAction::Increase));
        assert_eq!(CartAction::parse("decrease"), Some(CartAction::Decrease));
        assert_eq!(CartAction::parse("remove"), Some(CartAction::Remove));
        assert_eq!(CartAction::parse("explode"), None);
    }

    #[test]
    fn test_status_round_trip_and_mutability() {
        assert_eq!(OrderStatus::from(STATUS_CART), OrderStatus::Cart);
        assert_eq!(OrderStatus::from(STATUS_ORDERED), OrderStatus::Ordered);
        assert_eq!(OrderStatus::from("unknown"), OrderStatus::Pending);
        assert!(OrderStatus::Cart.is_mutable());
        assert!(!OrderStatus::Ordered.is_mutable());
    }
}
