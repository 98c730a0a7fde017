//! HTTP request handlers.
//!
//! Page handlers render askama views; form handlers answer with a redirect
//! and leave a flash message for the page they redirect to.

pub mod auth_handler;
pub mod forum_handler;
pub mod pages_handler;
pub mod profile_handler;
pub mod shop_handler;
pub mod weather_handler;

pub use auth_handler::auth_routes;
pub use forum_handler::forum_routes;
pub use pages_handler::{page_routes, public_page_routes};
pub use profile_handler::profile_routes;
pub use shop_handler::shop_routes;
pub use weather_handler::{weather_api_routes, weather_routes};

use askama::Template;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;

use super::flash::{self, FlashLevel};
use crate::errors::{AppError, AppResult};

/// A rendered page together with the cookies it consumed.
pub type Page = (CookieJar, Html<String>);

/// A redirect carrying a flash message.
pub type Flashed = (CookieJar, Redirect);

pub(crate) fn render(jar: CookieJar, page: impl Template) -> AppResult<Page> {
    Ok((jar, Html(page.render()?)))
}

pub(crate) fn flash_redirect(
    jar: CookieJar,
    level: FlashLevel,
    text: impl Into<String>,
    to: &str,
) -> Flashed {
    (flash::push(jar, level, text), Redirect::to(to))
}

/// Show a business-rule failure on the page at `to`; anything else fails
/// the request.
pub(crate) fn recover(jar: CookieJar, err: AppError, to: &str) -> AppResult<Flashed> {
    if !err.is_user_facing() {
        return Err(err);
    }
    tracing::debug!(redirect = to, "Recovered from user error: {}", err);
    Ok(flash_redirect(jar, FlashLevel::Danger, err.to_string(), to))
}
