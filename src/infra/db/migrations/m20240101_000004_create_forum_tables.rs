//! Migration: Create forum posts and comments tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ForumPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ForumPosts::Title).string_len(200).not_null())
                    .col(ColumnDef::new(ForumPosts::Content).text().not_null())
                    .col(
                        ColumnDef::new(ForumPosts::Category)
                            .string_len(50)
                            .not_null()
                            .default("General"),
                    )
                    .col(ColumnDef::new(ForumPosts::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ForumPosts::DatePosted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_posts_user")
                            .from(ForumPosts::Table, ForumPosts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_posts_date_posted")
                    .table(ForumPosts::Table)
                    .col(ForumPosts::DatePosted)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ForumComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForumComments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ForumComments::Content).text().not_null())
                    .col(ColumnDef::new(ForumComments::UserId).uuid().not_null())
                    .col(ColumnDef::new(ForumComments::PostId).uuid().not_null())
                    .col(
                        ColumnDef::new(ForumComments::DatePosted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_comments_user")
                            .from(ForumComments::Table, ForumComments::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_comments_post")
                            .from(ForumComments::Table, ForumComments::PostId)
                            .to(ForumPosts::Table, ForumPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_comments_post")
                    .table(ForumComments::Table)
                    .col(ForumComments::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ForumPosts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ForumPosts {
    Table,
    Id,
    Title,
    Content,
    Category,
    UserId,
    DatePosted,
}

#[derive(Iden)]
enum ForumComments {
    Table,
    Id,
    Content,
    UserId,
    PostId,
    DatePosted,
}
