//! Forum service - Threads and replies.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{ALL_CATEGORIES, DASHBOARD_RECENT_POSTS, FORUM_PAGE_SIZE};
use crate::domain::forum::parse_comment;
use crate::domain::{ForumComment, ForumPost, NewPost, PostThread};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait ForumService: Send + Sync {
    /// Start a thread
    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
        category: Option<&str>,
    ) -> AppResult<ForumPost>;

    /// One page of threads, newest first; `"all"` selects every category
    async fn list_posts(&self, category: &str, page: u64) -> AppResult<Paginated<ForumPost>>;

    /// A thread with its replies
    async fn thread(&self, post_id: Uuid) -> AppResult<PostThread>;

    /// Reply to an existing thread
    async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> AppResult<ForumComment>;

    /// Newest threads for the dashboard
    async fn recent_posts(&self) -> AppResult<Vec<ForumPost>>;
}

pub struct ForumManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ForumManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ForumService for ForumManager<U> {
    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
        category: Option<&str>,
    ) -> AppResult<ForumPost> {
        let post = NewPost::parse(title, content, category)?;
        let created = self.uow.forum().create_post(author_id, post).await?;

        tracing::info!(post_id = %created.id, category = %created.category, "Forum post created");
        Ok(created)
    }

    async fn list_posts(&self, category: &str, page: u64) -> AppResult<Paginated<ForumPost>> {
        let category = category.trim();
        let filter = (!category.is_empty() && category != ALL_CATEGORIES)
            .then(|| category.to_string());

        self.uow
            .forum()
            .list_posts(filter, PaginationParams::new(page, FORUM_PAGE_SIZE))
            .await
    }

    async fn thread(&self, post_id: Uuid) -> AppResult<PostThread> {
        let forum = self.uow.forum();
        let post = forum.find_post(post_id).await?.ok_or_not_found()?;
        let comments = forum.comments_for(post_id).await?;

        Ok(PostThread { post, comments })
    }

    async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> AppResult<ForumComment> {
        let content = parse_comment(content)?;

        let forum = self.uow.forum();
        forum.find_post(post_id).await?.ok_or_not_found()?;
        forum.add_comment(post_id, author_id, content).await
    }

    async fn recent_posts(&self) -> AppResult<Vec<ForumPost>> {
        self.uow.forum().recent_posts(DASHBOARD_RECENT_POSTS).await
    }
}
