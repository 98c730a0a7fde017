//! API middleware.

mod auth;

pub use auth::{login_url, require_login, safe_next, session_middleware, CurrentUser};
