//! Authentication handlers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;

use super::{flash_redirect, recover, render, Flashed, Page};
use crate::api::extractors::ValidatedForm;
use crate::api::flash::{self, FlashLevel};
use crate::api::middleware::{login_url, safe_next, CurrentUser};
use crate::api::views::{Layout, LoginPage, RegisterPage};
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::NewUser;
use crate::errors::{AppError, AppResult};

/// Registration form
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(max = 80, message = "Username must be at most 80 characters"))]
    #[serde(default)]
    pub username: String,
    #[validate(length(max = 120, message = "Email must be at most 120 characters"))]
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Login form
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Please enter both username and password"))]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1, message = "Please enter both username and password"))]
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout).post(logout))
}

pub async fn register_page(user: Option<CurrentUser>, jar: CookieJar) -> AppResult<Page> {
    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        RegisterPage {
            layout: Layout::new(user.as_ref(), flashes),
            username: String::new(),
            email: String::new(),
        },
    )
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<ValidatedForm<RegisterForm>, AppError>,
) -> AppResult<Flashed> {
    let form = match form {
        Ok(ValidatedForm(form)) => form,
        Err(e) => return recover(jar, e, "/register"),
    };

    let new_user = NewUser {
        username: form.username,
        email: form.email,
        password: form.password,
        confirm_password: form.confirm_password,
    };

    match state.auth_service.register(new_user).await {
        Ok(_) => Ok(flash_redirect(
            jar,
            FlashLevel::Success,
            "Account created successfully! Please log in.",
            "/login",
        )),
        Err(e) => recover(jar, e, "/register"),
    }
}

pub async fn login_page(
    user: Option<CurrentUser>,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
) -> AppResult<Page> {
    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        LoginPage {
            layout: Layout::new(user.as_ref(), flashes),
            next: safe_next(query.next.as_deref()).unwrap_or_default().to_string(),
        },
    )
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<ValidatedForm<LoginForm>, AppError>,
) -> AppResult<Flashed> {
    let form = match form {
        Ok(ValidatedForm(form)) => form,
        Err(e) => return recover(jar, e, "/login"),
    };
    let retry = login_url(form.next.as_deref());

    let session = match state
        .auth_service
        .login(form.username.trim(), &form.password)
        .await
    {
        Ok(session) => session,
        Err(e) => return recover(jar, e, &retry),
    };

    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, session.token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    );
    let target = safe_next(form.next.as_deref()).unwrap_or("/dashboard");

    Ok(flash_redirect(
        jar,
        FlashLevel::Success,
        "Logged in successfully!",
        target,
    ))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth_service.logout(cookie.value());
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    flash_redirect(jar, FlashLevel::Info, "You have been logged out.", "/").into_response()
}
