use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Category, Comment, Like, Page, PageRequest, Post, PostQuery, PostWithLikes, User,
};
use crate::error::RepoError;

/// Generic repository trait defining the row operations every entity shares.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Community post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Filtered, ordered page of posts with their like counts.
    async fn list(&self, query: &PostQuery) -> Result<Page<PostWithLikes>, RepoError>;

    /// Find a post within a category, with its like count.
    async fn find_in_category(
        &self,
        category: Category,
        id: Uuid,
    ) -> Result<Option<PostWithLikes>, RepoError>;

    /// Atomically add one to the view counter.
    /// Returns `false` when no post matched.
    async fn increment_views(&self, category: Category, id: Uuid) -> Result<bool, RepoError>;

    /// Replace title and content. Leaves the view counter untouched.
    async fn update_content(
        &self,
        id: Uuid,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Post, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first.
    async fn list_for_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError>;

    async fn update_content(
        &self,
        id: Uuid,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Comment, RepoError>;
}

/// Like repository. The (post, user) pair is unique.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Return the existing like for the pair or insert one.
    /// The flag is `true` when a row was inserted.
    async fn get_or_create(&self, post_id: Uuid, user_id: Uuid) -> Result<(Like, bool), RepoError>;

    /// Remove the like for the pair. Returns whether one existed.
    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError>;

    async fn exists(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError>;

    async fn count_for_post(&self, post_id: Uuid) -> Result<i64, RepoError>;
}
