//! Forum posts and comments with their authors resolved.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::forum_comment::{self, Entity as CommentEntity};
use super::entities::forum_post::{self, Entity as PostEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{ForumComment, ForumPost, NewPost};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const UNKNOWN_AUTHOR: &str = "unknown";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Create a thread
    async fn create_post(&self, author_id: Uuid, post: NewPost) -> AppResult<ForumPost>;

    /// Newest threads first, optionally restricted to one category
    async fn list_posts(
        &self,
        category: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<ForumPost>>;

    /// The newest threads across all categories
    async fn recent_posts(&self, limit: u64) -> AppResult<Vec<ForumPost>>;

    /// Find a thread by ID
    async fn find_post(&self, id: Uuid) -> AppResult<Option<ForumPost>>;

    /// Replies to a thread, oldest first
    async fn comments_for(&self, post_id: Uuid) -> AppResult<Vec<ForumComment>>;

    /// Reply to a thread
    async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: String,
    ) -> AppResult<ForumComment>;
}

/// Concrete implementation of ForumRepository
pub struct ForumStore {
    db: DatabaseConnection,
}

impl ForumStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn username(&self, id: Uuid) -> AppResult<String> {
        let author = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(author.map_or_else(|| UNKNOWN_AUTHOR.to_string(), |u| u.username))
    }
}

fn to_post(model: forum_post::Model, author: Option<user::Model>) -> ForumPost {
    ForumPost {
        id: model.id,
        title: model.title,
        content: model.content,
        category: model.category,
        author_id: model.user_id,
        author: author.map_or_else(|| UNKNOWN_AUTHOR.to_string(), |u| u.username),
        date_posted: model.date_posted,
    }
}

fn to_comment(model: forum_comment::Model, author: Option<user::Model>) -> ForumComment {
    ForumComment {
        id: model.id,
        post_id: model.post_id,
        content: model.content,
        author_id: model.user_id,
        author: author.map_or_else(|| UNKNOWN_AUTHOR.to_string(), |u| u.username),
        date_posted: model.date_posted,
    }
}

#[async_trait]
impl ForumRepository for ForumStore {
    async fn create_post(&self, author_id: Uuid, post: NewPost) -> AppResult<ForumPost> {
        let model = forum_post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            user_id: Set(author_id),
            date_posted: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        let author = self.username(author_id).await?;
        Ok(ForumPost {
            author,
            ..to_post(model, None)
        })
    }

    async fn list_posts(
        &self,
        category: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<ForumPost>> {
        let mut query = PostEntity::find();
        if let Some(category) = category {
            query = query.filter(forum_post::Column::Category.eq(category));
        }

        let paginator = query
            .find_also_related(UserEntity)
            .order_by_desc(forum_post::Column::DatePosted)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let params = params.within(total);
        let rows = paginator.fetch_page(params.page_index()).await?;

        let posts = rows
            .into_iter()
            .map(|(post, author)| to_post(post, author))
            .collect();

        Ok(Paginated::new(posts, params.page(), params.limit(), total))
    }

    async fn recent_posts(&self, limit: u64) -> AppResult<Vec<ForumPost>> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(forum_post::Column::DatePosted)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(post, author)| to_post(post, author))
            .collect())
    }

    async fn find_post(&self, id: Uuid) -> AppResult<Option<ForumPost>> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|(post, author)| to_post(post, author)))
    }

    async fn comments_for(&self, post_id: Uuid) -> AppResult<Vec<ForumComment>> {
        let rows = CommentEntity::find()
            .filter(forum_comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(forum_comment::Column::DatePosted)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| to_comment(comment, author))
            .collect())
    }

    async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: String,
    ) -> AppResult<ForumComment> {
        let model = forum_comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            content: Set(content),
            user_id: Set(author_id),
            post_id: Set(post_id),
            date_posted: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        let author = self.username(author_id).await?;
        Ok(ForumComment {
            author,
            ..to_comment(model, None)
        })
    }
}
