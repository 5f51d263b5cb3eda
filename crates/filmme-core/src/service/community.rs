//! Community board use cases: posts, likes and comments.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Category, Comment, Page, PaginationPolicy, Post, PostDetails, PostOrdering, PostQuery,
    PostWithLikes,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, LikeRepository, PostRepository};

const TITLE_MAX_CHARS: usize = 100;
const COMMENT_MAX_CHARS: usize = 1000;

/// Fields of a post being written.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Partial update of a post. Absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Like state of a post for one user after a like or unlike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    /// Whether the request changed anything.
    pub changed: bool,
    pub like_count: i64,
}

/// Community board service.
///
/// Authentication happens before these calls: an `actor` is always a
/// verified user id. Ownership is checked here.
pub struct CommunityService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
    post_pages: PaginationPolicy,
    comment_pages: PaginationPolicy,
}

impl CommunityService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            posts,
            comments,
            likes,
            post_pages: PaginationPolicy::POSTS,
            comment_pages: PaginationPolicy::COMMENTS,
        }
    }

    pub fn with_pagination(mut self, posts: PaginationPolicy, comments: PaginationPolicy) -> Self {
        self.post_pages = posts;
        self.comment_pages = comments;
        self
    }

    // ----- posts -----

    pub async fn list_posts(
        &self,
        category: Category,
        ordering: PostOrdering,
        search: Option<&str>,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<Page<PostWithLikes>, DomainError> {
        let request = self.post_pages.request(page, page_size)?;
        let query = PostQuery::new(category, ordering, search, request);

        let page = self.posts.list(&query).await?;
        if page.is_out_of_range() {
            return Err(DomainError::InvalidPage(page.page));
        }
        Ok(page)
    }

    pub async fn create_post(
        &self,
        author: Uuid,
        category: Category,
        new_post: NewPost,
    ) -> Result<PostWithLikes, DomainError> {
        let title = validate_title(&new_post.title)?;
        validate_content(&new_post.content)?;

        let post = self
            .posts
            .create(Post::new(category, author, title, new_post.content))
            .await?;

        tracing::info!(post_id = %post.id, %category, user_id = %author, "Post created");

        Ok(PostWithLikes {
            post,
            like_count: 0,
        })
    }

    /// Fetch a post for its detail page, counting the view.
    pub async fn retrieve_post(
        &self,
        category: Category,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<PostDetails, DomainError> {
        if !self.posts.increment_views(category, id).await? {
            return Err(DomainError::not_found("post", id));
        }

        let entry = self.find_post(category, id).await?;
        let liked = match viewer {
            Some(user_id) => Some(self.likes.exists(id, user_id).await?),
            None => None,
        };

        Ok(PostDetails::new(entry, liked))
    }

    pub async fn update_post(
        &self,
        actor: Uuid,
        category: Category,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<PostDetails, DomainError> {
        let entry = self.owned_post(actor, category, id).await?;
        let liked = Some(self.likes.exists(id, actor).await?);

        if changes.is_empty() {
            return Ok(PostDetails::new(entry, liked));
        }

        let title = match changes.title {
            Some(title) => validate_title(&title)?,
            None => entry.post.title,
        };
        let content = match changes.content {
            Some(content) => {
                validate_content(&content)?;
                content
            }
            None => entry.post.content,
        };

        let post = self
            .posts
            .update_content(id, title, content, Utc::now())
            .await
            .map_err(|e| missing_as_not_found(e, "post", id))?;

        tracing::info!(post_id = %id, user_id = %actor, "Post updated");

        Ok(PostDetails {
            post,
            like_count: entry.like_count,
            liked,
        })
    }

    pub async fn delete_post(
        &self,
        actor: Uuid,
        category: Category,
        id: Uuid,
    ) -> Result<(), DomainError> {
        self.owned_post(actor, category, id).await?;

        self.posts
            .delete(id)
            .await
            .map_err(|e| missing_as_not_found(e, "post", id))?;

        tracing::info!(post_id = %id, user_id = %actor, "Post deleted");
        Ok(())
    }

    // ----- likes -----

    pub async fn like_post(
        &self,
        actor: Uuid,
        category: Category,
        id: Uuid,
    ) -> Result<LikeStatus, DomainError> {
        self.find_post(category, id).await?;

        let (_, created) = self.likes.get_or_create(id, actor).await?;
        let like_count = self.likes.count_for_post(id).await?;

        tracing::debug!(post_id = %id, user_id = %actor, created, "Post liked");

        Ok(LikeStatus {
            liked: true,
            changed: created,
            like_count,
        })
    }

    pub async fn unlike_post(
        &self,
        actor: Uuid,
        category: Category,
        id: Uuid,
    ) -> Result<LikeStatus, DomainError> {
        self.find_post(category, id).await?;

        let removed = self.likes.remove(id, actor).await?;
        let like_count = self.likes.count_for_post(id).await?;

        tracing::debug!(post_id = %id, user_id = %actor, removed, "Post unliked");

        Ok(LikeStatus {
            liked: false,
            changed: removed,
            like_count,
        })
    }

    // ----- comments -----

    pub async fn list_comments(
        &self,
        category: Category,
        post_id: Uuid,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<Page<Comment>, DomainError> {
        let request = self.comment_pages.request(page, page_size)?;
        self.find_post(category, post_id).await?;

        let page = self.comments.list_for_post(post_id, request).await?;
        if page.is_out_of_range() {
            return Err(DomainError::InvalidPage(page.page));
        }
        Ok(page)
    }

    pub async fn add_comment(
        &self,
        actor: Uuid,
        category: Category,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment, DomainError> {
        validate_comment(&content)?;
        self.find_post(category, post_id).await?;

        let comment = self
            .comments
            .create(Comment::new(post_id, actor, content))
            .await?;

        tracing::info!(comment_id = %comment.id, %post_id, user_id = %actor, "Comment added");
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        actor: Uuid,
        category: Category,
        post_id: Uuid,
        comment_id: Uuid,
        content: String,
    ) -> Result<Comment, DomainError> {
        validate_comment(&content)?;
        self.owned_comment(actor, category, post_id, comment_id).await?;

        self.comments
            .update_content(comment_id, content, Utc::now())
            .await
            .map_err(|e| missing_as_not_found(e, "comment", comment_id))
    }

    pub async fn delete_comment(
        &self,
        actor: Uuid,
        category: Category,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), DomainError> {
        self.owned_comment(actor, category, post_id, comment_id).await?;

        self.comments
            .delete(comment_id)
            .await
            .map_err(|e| missing_as_not_found(e, "comment", comment_id))?;

        tracing::info!(%comment_id, %post_id, user_id = %actor, "Comment deleted");
        Ok(())
    }

    // ----- lookups -----

    async fn find_post(&self, category: Category, id: Uuid) -> Result<PostWithLikes, DomainError> {
        self.posts
            .find_in_category(category, id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    async fn owned_post(
        &self,
        actor: Uuid,
        category: Category,
        id: Uuid,
    ) -> Result<PostWithLikes, DomainError> {
        let entry = self.find_post(category, id).await?;
        if !entry.post.is_owned_by(actor) {
            tracing::warn!(post_id = %id, user_id = %actor, "Rejected change by non-author");
            return Err(DomainError::Forbidden("post"));
        }
        Ok(entry)
    }

    async fn owned_comment(
        &self,
        actor: Uuid,
        category: Category,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        self.find_post(category, post_id).await?;

        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))?;

        if !comment.is_owned_by(actor) {
            tracing::warn!(%comment_id, user_id = %actor, "Rejected change by non-author");
            return Err(DomainError::Forbidden("comment"));
        }
        Ok(comment)
    }
}

/// A row deleted between the ownership check and the write reads as missing.
fn missing_as_not_found(err: RepoError, entity_type: &'static str, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::Validation("content must not be empty".to_string()));
    }
    Ok(())
}

fn validate_comment(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::Validation("comment must not be empty".to_string()));
    }
    if content.chars().count() > COMMENT_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "comment must be at most {COMMENT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(validate_title("  Hello  ").unwrap(), "Hello");
    }

    #[test]
    fn test_title_limits() {
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"가".repeat(100)).is_ok());
        assert!(validate_title(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_comment_limits() {
        assert!(validate_comment("").is_err());
        assert!(validate_comment("nice tip").is_ok());
        assert!(validate_comment(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn test_empty_changes() {
        assert!(PostChanges::default().is_empty());
        let changes = PostChanges {
            title: Some("t".to_string()),
            content: None,
        };
        assert!(!changes.is_empty());
    }
}
