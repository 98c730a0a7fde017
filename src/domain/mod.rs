//! Domain layer - Core business entities and logic
//!
//! Plain records and pure rules with no knowledge of storage or HTTP:
//! the cart state machine, money formatting, forum input rules, weather
//! normalization and the agronomy reference tables.

pub mod forum;
pub mod loan;
pub mod money;
pub mod order;
pub mod password;
pub mod product;
pub mod reference;
pub mod user;
pub mod weather;

pub use forum::{ForumComment, ForumPost, NewPost, PostThread};
pub use loan::{LoanQuote, LoanTerms};
pub use money::{format_inr, Money};
pub use order::{
    compute_total, AddOutcome, AdjustOutcome, CartAction, CheckoutOutcome, Order, OrderLine,
    OrderStatus, QuantityChange,
};
pub use password::Password;
pub use product::{NewProduct, Product};
pub use user::{NewUser, ProfileUpdate, User};
pub use weather::{ForecastDay, WeatherReport};
