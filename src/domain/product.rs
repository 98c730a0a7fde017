//! Shop catalog item.

use serde::Serialize;
use uuid::Uuid;

use super::Money;

/// A product offered in the shop. Read-only for end users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
    pub category: String,
    pub in_stock: bool,
}

/// Catalog entry used when seeding an empty shop.
#[derive(Debug, Clone, Copy)]
pub struct NewProduct {
    pub name: &'static str,
    pub description: &'static str,
    pub price: Money,
    pub image: &'static str,
    pub category: &'static str,
    pub in_stock: bool,
}
