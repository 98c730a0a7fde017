//! Session cookie authentication middleware.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::views::Layout;
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::errors::{AppError, ErrorDetails};

/// Authenticated user resolved from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Resolve the session cookie into a [`CurrentUser`] request extension.
///
/// Requests without a live session pass through anonymously; routes that
/// need a user sit behind [`require_login`]. Error pages are re-rendered
/// with the user's navigation.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match state.auth_service.verify_session(cookie.value()) {
            Ok(claims) => {
                request.extensions_mut().insert(CurrentUser {
                    id: claims.sub,
                    username: claims.username,
                });
            }
            Err(e) => tracing::debug!("Ignoring stale session cookie: {}", e),
        }
    }

    let user = request.extensions().get::<CurrentUser>().cloned();
    let response = next.run(request).await;

    let details = response.extensions().get::<ErrorDetails>().cloned();
    match (user, details) {
        (Some(user), Some(details)) => details.render(Layout::new(Some(&user), Vec::new())),
        _ => response,
    }
}

/// Send anonymous visitors to the login page, remembering where they were.
pub async fn require_login(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentUser>().is_some() {
        return next.run(request).await;
    }

    Redirect::to(&login_url(Some(request.uri().path()))).into_response()
}

/// Login page address, carrying the page to return to.
pub fn login_url(next: Option<&str>) -> String {
    match safe_next(next) {
        Some(next) => format!("/login?next={}", urlencoding::encode(next)),
        None => "/login".to_string(),
    }
}

/// Only same-site relative paths are accepted as a post-login target.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.map(str::trim)
        .filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        assert_eq!(login_url(Some("/cart")), "/login?next=%2Fcart");
        assert_eq!(
            login_url(Some("/forum?category=Crops & Soil")),
            "/login?next=%2Fforum%3Fcategory%3DCrops%20%26%20Soil"
        );
        assert_eq!(login_url(Some("//evil.example")), "/login");
        assert_eq!(login_url(None), "/login");
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/cart")), Some("/cart"));
        assert_eq!(safe_next(Some("//evil.example")), None);
        assert_eq!(safe_next(Some("https://evil.example")), None);
        assert_eq!(safe_next(Some("/\\evil.example")), None);
        assert_eq!(safe_next(None), None);
    }
}
