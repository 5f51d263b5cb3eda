//! In-memory store - used when no database is configured, and in tests.
//!
//! One lock guards every table so that cascades and the like uniqueness
//! check happen atomically. Data is lost on process restart.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use filmme_core::domain::{
    Category, Comment, Like, Page, PageRequest, Post, PostOrdering, PostQuery, PostWithLikes,
    User,
};
use filmme_core::error::RepoError;
use filmme_core::ports::{
    BaseRepository, CommentRepository, LikeRepository, PostRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    /// Keyed by (post_id, user_id).
    likes: HashMap<(Uuid, Uuid), Like>,
    /// Per-post like totals, kept in step with `likes`.
    like_counts: HashMap<Uuid, i64>,
}

impl Tables {
    fn like_count(&self, post_id: Uuid) -> i64 {
        self.like_counts.get(&post_id).copied().unwrap_or(0)
    }

    /// Returns the existing like, or inserts one and bumps the post's total.
    fn add_like(&mut self, post_id: Uuid, user_id: Uuid) -> (Like, bool) {
        match self.likes.entry((post_id, user_id)) {
            Entry::Occupied(existing) => (existing.get().clone(), false),
            Entry::Vacant(slot) => {
                let like = slot.insert(Like::new(post_id, user_id)).clone();
                *self.like_counts.entry(post_id).or_insert(0) += 1;
                (like, true)
            }
        }
    }

    fn remove_like(&mut self, post_id: Uuid, user_id: Uuid) -> bool {
        if self.likes.remove(&(post_id, user_id)).is_none() {
            return false;
        }
        if let Entry::Occupied(mut count) = self.like_counts.entry(post_id) {
            *count.get_mut() -= 1;
            if *count.get() <= 0 {
                count.remove();
            }
        }
        true
    }

    fn with_likes(&self, post: &Post) -> PostWithLikes {
        PostWithLikes {
            post: post.clone(),
            like_count: self.like_count(post.id),
        }
    }
}

/// In-memory implementation of every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.page_size as usize)
        .collect();
    Page::new(items, total, request)
}

/// Requested order first, then newest, then id for a stable page order.
fn listing_order(ordering: PostOrdering, a: &PostWithLikes, b: &PostWithLikes) -> Ordering {
    let primary = match ordering {
        PostOrdering::Popular => b.post.view_count.cmp(&a.post.view_count),
        PostOrdering::MostLiked => b.like_count.cmp(&a.like_count),
        PostOrdering::Latest => Ordering::Equal,
    };

    primary
        .then_with(|| b.post.created_at.cmp(&a.post.created_at))
        .then_with(|| b.post.id.cmp(&a.post.id))
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }
        match tables.users.entry(user.id) {
            Entry::Occupied(_) => Err(RepoError::Constraint("User already exists".to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.posts.entry(post.id) {
            Entry::Occupied(_) => Err(RepoError::Constraint("Post already exists".to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(post).clone()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;

        // cascade
        tables.comments.retain(|_, c| c.post_id != id);
        tables.likes.retain(|(post_id, _), _| *post_id != id);
        tables.like_counts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(&self, query: &PostQuery) -> Result<Page<PostWithLikes>, RepoError> {
        let tables = self.tables.read().await;

        let mut matches: Vec<PostWithLikes> = tables
            .posts
            .values()
            .filter(|p| p.category == query.category && query.matches_title(&p.title))
            .map(|p| tables.with_likes(p))
            .collect();
        matches.sort_by(|a, b| listing_order(query.ordering, a, b));

        Ok(paginate(matches, query.page))
    }

    async fn find_in_category(
        &self,
        category: Category,
        id: Uuid,
    ) -> Result<Option<PostWithLikes>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .get(&id)
            .filter(|p| p.category == category)
            .map(|p| tables.with_likes(p)))
    }

    async fn increment_views(&self, category: Category, id: Uuid) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.posts.get_mut(&id) {
            Some(post) if post.category == category => {
                post.view_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_content(
        &self,
        id: Uuid,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = title;
        post.content = content;
        post.updated_at = updated_at;
        Ok(post.clone())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint("Post does not exist".to_string()));
        }
        match tables.comments.entry(comment.id) {
            Entry::Occupied(_) => Err(RepoError::Constraint("Comment already exists".to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(comment).clone()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError> {
        let tables = self.tables.read().await;

        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(paginate(comments, page))
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let comment = tables.comments.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.content = content;
        comment.updated_at = updated_at;
        Ok(comment.clone())
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn get_or_create(&self, post_id: Uuid, user_id: Uuid) -> Result<(Like, bool), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post_id) {
            return Err(RepoError::Constraint("Post does not exist".to_string()));
        }

        Ok(tables.add_like(post_id, user_id))
    }

    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.remove_like(post_id, user_id))
    }

    async fn exists(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.contains_key(&(post_id, user_id)))
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<i64, RepoError> {
        Ok(self.tables.read().await.like_count(post_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use filmme_core::domain::PaginationPolicy;
    use filmme_core::service::{NewPost, PostChanges};
    use filmme_core::{CommunityService, DomainError};

    use super::*;

    fn service(store: &Arc<InMemoryStore>) -> CommunityService {
        CommunityService::new(store.clone(), store.clone(), store.clone())
    }

    /// Insert a post created `age_minutes` ago.
    async fn seed_post(
        store: &InMemoryStore,
        category: Category,
        author: Uuid,
        title: &str,
        age_minutes: i64,
    ) -> Post {
        let mut post = Post::new(category, author, title.to_string(), "body".to_string());
        post.created_at = Utc::now() - Duration::minutes(age_minutes);
        post.updated_at = post.created_at;
        BaseRepository::<Post, Uuid>::create(store, post).await.unwrap()
    }

    fn titles(page: &Page<PostWithLikes>) -> Vec<&str> {
        page.items.iter().map(|p| p.post.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_listing_is_newest_first_and_category_scoped() {
        let store = Arc::new(InMemoryStore::new());
        let author = Uuid::new_v4();
        seed_post(&store, Category::Common, author, "old", 30).await;
        seed_post(&store, Category::Common, author, "new", 1).await;
        seed_post(&store, Category::Suggestion, author, "elsewhere", 5).await;

        let page = service(&store)
            .list_posts(Category::Common, PostOrdering::Latest, None, None, None)
            .await
            .unwrap();

        assert_eq!(titles(&page), vec!["new", "old"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_popular_orders_by_view_count() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let author = Uuid::new_v4();
        let quiet = seed_post(&store, Category::CinemaTip, author, "quiet", 1).await;
        let busy = seed_post(&store, Category::CinemaTip, author, "busy", 10).await;

        for _ in 0..3 {
            svc.retrieve_post(Category::CinemaTip, busy.id, None).await.unwrap();
        }
        svc.retrieve_post(Category::CinemaTip, quiet.id, None).await.unwrap();

        let page = svc
            .list_posts(Category::CinemaTip, PostOrdering::Popular, None, None, None)
            .await
            .unwrap();

        assert_eq!(titles(&page), vec!["busy", "quiet"]);
        assert_eq!(page.items[0].post.view_count, 3);
    }

    #[tokio::test]
    async fn test_like_ordering_uses_like_count() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let author = Uuid::new_v4();
        seed_post(&store, Category::Common, author, "ignored", 1).await;
        let loved = seed_post(&store, Category::Common, author, "loved", 60).await;

        for _ in 0..2 {
            svc.like_post(Uuid::new_v4(), Category::Common, loved.id)
                .await
                .unwrap();
        }

        let page = svc
            .list_posts(Category::Common, PostOrdering::MostLiked, None, None, None)
            .await
            .unwrap();

        assert_eq!(titles(&page), vec!["loved", "ignored"]);
        assert_eq!(page.items[0].like_count, 2);
        assert_eq!(page.items[1].like_count, 0);
    }

    #[tokio::test]
    async fn test_search_and_pagination() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let author = Uuid::new_v4();
        for i in 0..5 {
            seed_post(&store, Category::Common, author, &format!("IMAX night {i}"), i).await;
        }
        seed_post(&store, Category::Common, author, "Popcorn prices", 10).await;

        let page = svc
            .list_posts(Category::Common, PostOrdering::Latest, Some("imax"), Some(2), Some(2))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(titles(&page), vec!["IMAX night 2", "IMAX night 3"]);

        let err = svc
            .list_posts(Category::Common, PostOrdering::Latest, Some("imax"), Some(4), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPage(4)));
    }

    #[tokio::test]
    async fn test_empty_first_page_is_valid() {
        let store = Arc::new(InMemoryStore::new());
        let page = service(&store)
            .list_posts(Category::Suggestion, PostOrdering::Latest, None, Some(1), None)
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_increments_views_by_one() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let post = seed_post(&store, Category::Common, Uuid::new_v4(), "hello", 1).await;

        let first = svc.retrieve_post(Category::Common, post.id, None).await.unwrap();
        let second = svc.retrieve_post(Category::Common, post.id, None).await.unwrap();

        assert_eq!(first.post.view_count, 1);
        assert_eq!(second.post.view_count, 2);
        assert_eq!(first.liked, None);
    }

    #[tokio::test]
    async fn test_wrong_category_is_not_found_and_not_counted() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let post = seed_post(&store, Category::Common, Uuid::new_v4(), "hello", 1).await;

        let err = svc
            .retrieve_post(Category::CinemaTip, post.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "post", .. }));

        let stored = BaseRepository::<Post, Uuid>::find_by_id(&*store, post.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.view_count, 0);
    }

    #[tokio::test]
    async fn test_create_post_validates_and_trims() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let author = Uuid::new_v4();

        let created = svc
            .create_post(
                author,
                Category::Suggestion,
                NewPost {
                    title: "  Dark mode please  ".to_string(),
                    content: "My eyes".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.post.title, "Dark mode please");
        assert_eq!(created.post.view_count, 0);
        assert_eq!(created.like_count, 0);

        let err = svc
            .create_post(
                author,
                Category::Suggestion,
                NewPost {
                    title: "Empty".to_string(),
                    content: " ".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_only_owner_may_update_or_delete() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let post = seed_post(&store, Category::Common, owner, "mine", 1).await;

        let changes = PostChanges {
            title: Some("hijacked".to_string()),
            content: None,
        };
        let err = svc
            .update_post(stranger, Category::Common, post.id, changes.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden("post")));

        let err = svc
            .delete_post(stranger, Category::Common, post.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden("post")));

        let updated = svc
            .update_post(owner, Category::Common, post.id, changes)
            .await
            .unwrap();
        assert_eq!(updated.post.title, "hijacked");
        assert_eq!(updated.post.content, "body");
        assert!(updated.post.updated_at > post.updated_at);

        svc.delete_post(owner, Category::Common, post.id).await.unwrap();
        let err = svc
            .retrieve_post(Category::Common, post.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_update_writes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let post = seed_post(&store, Category::Common, owner, "same", 1).await;

        let result = svc
            .update_post(owner, Category::Common, post.id, PostChanges::default())
            .await
            .unwrap();

        assert_eq!(result.post.title, "same");
        assert_eq!(result.post.updated_at, post.updated_at);
    }

    #[tokio::test]
    async fn test_update_never_touches_view_count() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let post = seed_post(&store, Category::Common, owner, "viewed", 1).await;
        svc.retrieve_post(Category::Common, post.id, None).await.unwrap();

        let updated = svc
            .update_post(
                owner,
                Category::Common,
                post.id,
                PostChanges {
                    title: None,
                    content: Some("edited".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.post.view_count, 1);
    }

    #[tokio::test]
    async fn test_double_like_keeps_single_record() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let user = Uuid::new_v4();
        let post = seed_post(&store, Category::Common, Uuid::new_v4(), "likeable", 1).await;

        let first = svc.like_post(user, Category::Common, post.id).await.unwrap();
        let second = svc.like_post(user, Category::Common, post.id).await.unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.like_count, 1);
        assert_eq!(store.count_for_post(post.id).await.unwrap(), 1);

        let details = svc
            .retrieve_post(Category::Common, post.id, Some(user))
            .await
            .unwrap();
        assert_eq!(details.liked, Some(true));
        assert_eq!(details.like_count, 1);
    }

    #[tokio::test]
    async fn test_unlike_then_like_again() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let user = Uuid::new_v4();
        let post = seed_post(&store, Category::Common, Uuid::new_v4(), "fickle", 1).await;

        svc.like_post(user, Category::Common, post.id).await.unwrap();
        let removed = svc.unlike_post(user, Category::Common, post.id).await.unwrap();
        assert!(removed.changed);
        assert_eq!(removed.like_count, 0);
        assert!(!store.exists(post.id, user).await.unwrap());

        let again = svc.unlike_post(user, Category::Common, post.id).await.unwrap();
        assert!(!again.changed);

        let relike = svc.like_post(user, Category::Common, post.id).await.unwrap();
        assert!(relike.changed);
        assert_eq!(relike.like_count, 1);
    }

    #[tokio::test]
    async fn test_like_missing_post_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store)
            .like_post(Uuid::new_v4(), Category::Common, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let author = Uuid::new_v4();
        let commenter = Uuid::new_v4();
        let post = seed_post(&store, Category::CinemaTip, author, "tips", 1).await;

        let first = svc
            .add_comment(commenter, Category::CinemaTip, post.id, "first".to_string())
            .await
            .unwrap();
        svc.add_comment(author, Category::CinemaTip, post.id, "second".to_string())
            .await
            .unwrap();

        let page = svc
            .list_comments(Category::CinemaTip, post.id, None, None)
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items.iter().any(|c| c.id == first.id));

        let err = svc
            .update_comment(author, Category::CinemaTip, post.id, first.id, "mine now".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden("comment")));

        let edited = svc
            .update_comment(commenter, Category::CinemaTip, post.id, first.id, "edited".to_string())
            .await
            .unwrap();
        assert_eq!(edited.content, "edited");

        svc.delete_comment(commenter, Category::CinemaTip, post.id, first.id)
            .await
            .unwrap();
        let page = svc
            .list_comments(Category::CinemaTip, post.id, None, None)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_comment_addressed_through_other_post_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let user = Uuid::new_v4();
        let post_a = seed_post(&store, Category::Common, user, "a", 1).await;
        let post_b = seed_post(&store, Category::Common, user, "b", 2).await;

        let comment = svc
            .add_comment(user, Category::Common, post_a.id, "hi".to_string())
            .await
            .unwrap();

        let err = svc
            .delete_comment(user, Category::Common, post_b.id, comment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "comment", .. }));
    }

    #[tokio::test]
    async fn test_deleting_post_cascades() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let post = seed_post(&store, Category::Common, owner, "doomed", 1).await;

        let comment = svc
            .add_comment(owner, Category::Common, post.id, "bye".to_string())
            .await
            .unwrap();
        svc.like_post(owner, Category::Common, post.id).await.unwrap();

        svc.delete_post(owner, Category::Common, post.id).await.unwrap();

        assert!(
            BaseRepository::<Comment, Uuid>::find_by_id(&*store, comment.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(store.count_for_post(post.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_like_totals_follow_likes() {
        let store = Arc::new(InMemoryStore::new());
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let fans: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let popular = seed_post(&store, Category::Common, owner, "popular", 2).await;
        let quiet = seed_post(&store, Category::Common, owner, "quiet", 1).await;

        for fan in &fans {
            svc.like_post(*fan, Category::Common, popular.id).await.unwrap();
            svc.like_post(*fan, Category::Common, popular.id).await.unwrap();
        }
        svc.like_post(fans[0], Category::Common, quiet.id).await.unwrap();
        svc.unlike_post(fans[1], Category::Common, popular.id).await.unwrap();
        svc.unlike_post(fans[1], Category::Common, popular.id).await.unwrap();

        let page = svc
            .list_posts(Category::Common, PostOrdering::MostLiked, None, None, None)
            .await
            .unwrap();
        let counts: Vec<(Uuid, i64)> = page
            .items
            .iter()
            .map(|entry| (entry.post.id, entry.like_count))
            .collect();
        assert_eq!(counts, vec![(popular.id, 2), (quiet.id, 1)]);

        svc.delete_post(owner, Category::Common, popular.id).await.unwrap();
        assert_eq!(store.count_for_post(popular.id).await.unwrap(), 0);
        assert_eq!(store.count_for_post(quiet.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_custom_pagination_policy() {
        let store = Arc::new(InMemoryStore::new());
        let author = Uuid::new_v4();
        for i in 0..3 {
            seed_post(&store, Category::Common, author, &format!("p{i}"), i).await;
        }
        let policy = PaginationPolicy {
            default_page_size: 2,
            max_page_size: 2,
        };
        let svc = service(&store).with_pagination(policy, PaginationPolicy::COMMENTS);

        let page = svc
            .list_posts(Category::Common, PostOrdering::Latest, None, None, Some(100))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_size, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_error() {
        let store = InMemoryStore::new();
        let user = User::new("a@b.com".to_string(), "a".to_string(), "hash".to_string());
        BaseRepository::<User, Uuid>::create(&store, user).await.unwrap();

        let dup = User::new("a@b.com".to_string(), "b".to_string(), "hash".to_string());
        let err = BaseRepository::<User, Uuid>::create(&store, dup)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(store.find_by_email("a@b.com").await.unwrap().is_some());
    }
}
