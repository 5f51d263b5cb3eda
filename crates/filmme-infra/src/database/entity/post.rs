//! Community post entity for SeaORM.

use sea_orm::{FromQueryResult, Set};
use sea_orm::entity::prelude::*;

use filmme_core::domain::Category;

/// Category column. Values match the URL slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PostCategory {
    #[sea_orm(string_value = "common")]
    Common,
    #[sea_orm(string_value = "cinema_tip")]
    CinemaTip,
    #[sea_orm(string_value = "suggestion")]
    Suggestion,
}

impl From<Category> for PostCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Common => PostCategory::Common,
            Category::CinemaTip => PostCategory::CinemaTip,
            Category::Suggestion => PostCategory::Suggestion,
        }
    }
}

impl From<PostCategory> for Category {
    fn from(category: PostCategory) -> Self {
        match category {
            PostCategory::Common => Category::Common,
            PostCategory::CinemaTip => Category::CinemaTip,
            PostCategory::Suggestion => Category::Suggestion,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "community_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category: PostCategory,
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub view_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::like::Entity")]
    Likes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for filmme_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category: model.category.into(),
            user_id: model.user_id,
            title: model.title,
            content: model.content,
            view_count: model.view_count,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<filmme_core::domain::Post> for ActiveModel {
    fn from(post: filmme_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            category: Set(post.category.into()),
            user_id: Set(post.user_id),
            title: Set(post.title),
            content: Set(post.content),
            view_count: Set(post.view_count),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}

/// A post row annotated with `COUNT(likes)`.
#[derive(Debug, Clone, FromQueryResult)]
pub struct PostWithLikeCount {
    pub id: Uuid,
    pub category: PostCategory,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub like_count: i64,
}

impl From<PostWithLikeCount> for filmme_core::domain::PostWithLikes {
    fn from(row: PostWithLikeCount) -> Self {
        Self {
            post: filmme_core::domain::Post {
                id: row.id,
                category: row.category.into(),
                user_id: row.user_id,
                title: row.title,
                content: row.content,
                view_count: row.view_count,
                created_at: row.created_at.into(),
                updated_at: row.updated_at.into(),
            },
            like_count: row.like_count,
        }
    }
}
