//! Discussion forum records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::DEFAULT_FORUM_CATEGORY;
use crate::errors::{AppError, AppResult};

/// Categories offered when starting a thread.
pub const FORUM_CATEGORIES: &[&str] = &[
    "General",
    "Crops",
    "Livestock",
    "Equipment",
    "Market",
    "Weather",
];

/// A forum thread with its author's username resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ForumPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: Uuid,
    pub author: String,
    pub date_posted: DateTime<Utc>,
}

/// A reply to a thread.
#[derive(Debug, Clone, Serialize)]
pub struct ForumComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub author: String,
    pub date_posted: DateTime<Utc>,
}

/// A thread together with its replies, oldest reply first.
#[derive(Debug, Clone, Serialize)]
pub struct PostThread {
    pub post: ForumPost,
    pub comments: Vec<ForumComment>,
}

/// Validated input for a new thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NewPost {
    /// Trim the inputs and reject an empty title or body. A missing
    /// category falls back to the default one.
    pub fn parse(title: &str, content: &str, category: Option<&str>) -> AppResult<Self> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(AppError::validation("Title and content are required!"));
        }

        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_FORUM_CATEGORY);

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
        })
    }
}

/// Trim a comment body, rejecting an empty one.
pub fn parse_comment(content: &str) -> AppResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::validation("Comment cannot be empty!"));
    }
    Ok(content.to_string())
}
