use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityPosts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::Category)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityPosts::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CommunityPosts::Title)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityPosts::Content).text().not_null())
                    .col(
                        ColumnDef::new(CommunityPosts::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_posts_user")
                            .from(CommunityPosts::Table, CommunityPosts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings filter by category and sort by creation time.
        manager
            .create_index(
                Index::create()
                    .name("idx_community_posts_category_created_at")
                    .table(CommunityPosts::Table)
                    .col(CommunityPosts::Category)
                    .col(CommunityPosts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityComments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommunityComments::PostId).uuid().not_null())
                    .col(ColumnDef::new(CommunityComments::UserId).uuid().not_null())
                    .col(ColumnDef::new(CommunityComments::Content).text().not_null())
                    .col(
                        ColumnDef::new(CommunityComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CommunityComments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_comments_post")
                            .from(CommunityComments::Table, CommunityComments::PostId)
                            .to(CommunityPosts::Table, CommunityPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_comments_user")
                            .from(CommunityComments::Table, CommunityComments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_comments_post_id")
                    .table(CommunityComments::Table)
                    .col(CommunityComments::PostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityLikes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommunityLikes::PostId).uuid().not_null())
                    .col(ColumnDef::new(CommunityLikes::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CommunityLikes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_likes_post")
                            .from(CommunityLikes::Table, CommunityLikes::PostId)
                            .to(CommunityPosts::Table, CommunityPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_likes_user")
                            .from(CommunityLikes::Table, CommunityLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One like per user per post; the like upsert relies on it.
        manager
            .create_index(
                Index::create()
                    .name("uq_community_likes_post_user")
                    .table(CommunityLikes::Table)
                    .col(CommunityLikes::PostId)
                    .col(CommunityLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityLikes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CommunityPosts {
    Table,
    Id,
    Category,
    UserId,
    Title,
    Content,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommunityComments {
    Table,
    Id,
    PostId,
    UserId,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommunityLikes {
    Table,
    Id,
    PostId,
    UserId,
    CreatedAt,
}
