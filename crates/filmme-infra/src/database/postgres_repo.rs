//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Iterable, JoinType, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use filmme_core::domain::{
    Category, Comment, Like, Page, PageRequest, Post, PostOrdering, PostQuery, PostWithLikes,
    User,
};
use filmme_core::error::RepoError;
use filmme_core::ports::{CommentRepository, LikeRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity, PostCategory, PostWithLikeCount};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// Mask an email for logging: `j***@example.com`.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Posts joined with their likes, one row per post with `like_count`.
fn select_with_like_count() -> Select<PostEntity> {
    PostEntity::find()
        .select_only()
        .columns(post::Column::iter())
        .column_as(like_count_expr(), "like_count")
        .join(JoinType::LeftJoin, post::Relation::Likes.def())
        .group_by(post::Column::Id)
}

fn like_count_expr() -> sea_orm::sea_query::SimpleExpr {
    Expr::col((LikeEntity, like::Column::Id)).count()
}

/// `%` and `_` in user input match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Page<PostWithLikes>, RepoError> {
        let mut select = select_with_like_count()
            .filter(post::Column::Category.eq(PostCategory::from(query.category)));

        if let Some(term) = &query.search {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((PostEntity, post::Column::Title))))
                    .like(like_pattern(term)),
            );
        }

        select = match query.ordering {
            PostOrdering::Popular => select.order_by_desc(post::Column::ViewCount),
            PostOrdering::MostLiked => select.order_by(like_count_expr(), Order::Desc),
            PostOrdering::Latest => select,
        };
        let select = select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id);

        let paginator = select
            .into_model::<PostWithLikeCount>()
            .paginate(&self.db, query.page.page_size);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(query.page.index())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            category = %query.category,
            ordering = ?query.ordering,
            total,
            "Listed community posts"
        );

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total,
            query.page,
        ))
    }

    async fn find_in_category(
        &self,
        category: Category,
        id: Uuid,
    ) -> Result<Option<PostWithLikes>, RepoError> {
        let row = select_with_like_count()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::Category.eq(PostCategory::from(category)))
            .into_model::<PostWithLikeCount>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn increment_views(&self, category: Category, id: Uuid) -> Result<bool, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(
                post::Column::ViewCount,
                Expr::col(post::Column::ViewCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::Category.eq(PostCategory::from(category)))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn update_content(
        &self,
        id: Uuid,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Post, RepoError> {
        let changes = post::ActiveModel {
            id: Unchanged(id),
            title: Set(title),
            content: Set(content),
            updated_at: Set(updated_at.into()),
            ..Default::default()
        };

        let model = changes.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError> {
        let paginator = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .paginate(&self.db, page.page_size);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(page.index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total,
            page,
        ))
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Comment, RepoError> {
        let changes = comment::ActiveModel {
            id: Unchanged(id),
            content: Set(content),
            updated_at: Set(updated_at.into()),
            ..Default::default()
        };

        let model = changes.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

impl PostgresLikeRepository {
    async fn find_pair(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .filter(like::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn get_or_create(&self, post_id: Uuid, user_id: Uuid) -> Result<(Like, bool), RepoError> {
        if let Some(existing) = self.find_pair(post_id, user_id).await? {
            return Ok((existing, false));
        }

        let like = Like::new(post_id, user_id);
        let inserted = LikeEntity::insert(like::ActiveModel::from(like.clone()))
            .on_conflict(
                OnConflict::columns([like::Column::PostId, like::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        if inserted == 0 {
            // A concurrent request inserted the pair first.
            let existing = self
                .find_pair(post_id, user_id)
                .await?
                .ok_or(RepoError::NotFound)?;
            return Ok((existing, false));
        }

        Ok((like, true))
    }

    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let result = LikeEntity::delete_many()
            .filter(like::Column::PostId.eq(post_id))
            .filter(like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.find_pair(post_id, user_id).await?.is_some())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<i64, RepoError> {
        let count = LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count as i64)
    }
}
