use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Post entity - a community board post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub category: Category,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    /// Detail views so far. Only ever incremented.
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(category: Category, user_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category,
            user_id,
            title,
            content,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// A post annotated with its like count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithLikes {
    pub post: Post,
    pub like_count: i64,
}

/// A post as seen on its detail page.
#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub like_count: i64,
    /// Whether the viewer likes the post; `None` for anonymous viewers.
    pub liked: Option<bool>,
}

impl PostDetails {
    pub fn new(entry: PostWithLikes, liked: Option<bool>) -> Self {
        Self {
            post: entry.post,
            like_count: entry.like_count,
            liked,
        }
    }
}
