//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod forum_comment;
pub mod forum_post;
pub mod order;
pub mod product;
pub mod user;
