//! Forum handlers.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use super::{flash_redirect, recover, render, Flashed, Page};
use crate::api::extractors::{EntityId, ValidatedForm};
use crate::api::flash::{self, FlashLevel};
use crate::api::middleware::CurrentUser;
use crate::api::views::{CreatePostPage, ForumPage, ForumPostPage, Layout, SelectOption};
use crate::api::AppState;
use crate::config::{ALL_CATEGORIES, DEFAULT_FORUM_CATEGORY};
use crate::domain::forum::FORUM_CATEGORIES;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ForumQuery {
    #[serde(default = "all_categories")]
    pub category: String,
    #[serde(default = "first_page")]
    pub page: u64,
}

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

fn first_page() -> u64 {
    1
}

/// New thread form
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

/// Create forum routes
pub fn forum_routes() -> Router<AppState> {
    Router::new()
        .route("/forum", get(forum))
        .route("/forum/post/:id", get(forum_post))
        .route("/forum/create", get(create_post_page).post(create_post))
        .route("/forum/comment/:id", post(add_comment))
}

pub async fn forum(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    Query(query): Query<ForumQuery>,
) -> AppResult<Page> {
    let posts = state
        .forum_service
        .list_posts(&query.category, query.page)
        .await?;

    let mut categories = vec![SelectOption::new(
        ALL_CATEGORIES,
        "All Categories",
        &query.category,
    )];
    categories.extend(
        FORUM_CATEGORIES
            .iter()
            .map(|name| SelectOption::new(name, name, &query.category)),
    );

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        ForumPage {
            layout: Layout::new(Some(&current), flashes),
            has_prev: posts.has_prev(),
            has_next: posts.has_next(),
            page: posts.page,
            total_pages: posts.total_pages,
            posts: posts.items.into_iter().map(Into::into).collect(),
            categories,
            category: query.category,
        },
    )
}

pub async fn forum_post(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    EntityId(post_id): EntityId,
) -> AppResult<Page> {
    let thread = state.forum_service.thread(post_id).await?;

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        ForumPostPage {
            layout: Layout::new(Some(&current), flashes),
            post: thread.post.into(),
            comments: thread.comments.into_iter().map(Into::into).collect(),
        },
    )
}

pub async fn create_post_page(current: CurrentUser, jar: CookieJar) -> AppResult<Page> {
    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        CreatePostPage {
            layout: Layout::new(Some(&current), flashes),
            categories: FORUM_CATEGORIES
                .iter()
                .map(|name| SelectOption::new(name, name, DEFAULT_FORUM_CATEGORY))
                .collect(),
        },
    )
}

pub async fn create_post(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    form: Result<ValidatedForm<PostForm>, AppError>,
) -> AppResult<Flashed> {
    let form = match form {
        Ok(ValidatedForm(form)) => form,
        Err(e) => return recover(jar, e, "/forum/create"),
    };

    match state
        .forum_service
        .create_post(
            current.id,
            &form.title,
            &form.content,
            form.category.as_deref(),
        )
        .await
    {
        Ok(post) => Ok(flash_redirect(
            jar,
            FlashLevel::Success,
            "Your post has been created!",
            &format!("/forum/post/{}", post.id),
        )),
        Err(e) => recover(jar, e, "/forum/create"),
    }
}

pub async fn add_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    EntityId(post_id): EntityId,
    Form(form): Form<CommentForm>,
) -> AppResult<Flashed> {
    let back = format!("/forum/post/{}", post_id);

    match state
        .forum_service
        .add_comment(post_id, current.id, &form.content)
        .await
    {
        Ok(_) => Ok(flash_redirect(
            jar,
            FlashLevel::Success,
            "Your comment has been added!",
            &back,
        )),
        Err(e) => recover(jar, e, &back),
    }
}
