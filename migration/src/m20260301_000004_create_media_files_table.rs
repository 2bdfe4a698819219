//! # Media Files Table Migration
//!
//! Tracks every upload's lifecycle. `object_key` is globally unique across the bucket;
//! `status` only ever moves `pending → uploaded`, and the commit that performs that
//! transition is idempotent (a second commit of an already-`uploaded` row is a no-op).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$
                BEGIN
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'media_kind') THEN
                        CREATE TYPE media_kind AS ENUM ('audio', 'image');
                    END IF;
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'media_file_status') THEN
                        CREATE TYPE media_file_status AS ENUM ('pending', 'uploaded');
                    END IF;
                END$$;
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MediaFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaFiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(MediaFiles::SessionId).uuid().not_null())
                    .col(
                        ColumnDef::new(MediaFiles::Kind)
                            .custom(Alias::new("media_kind"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaFiles::ObjectKey)
                            .string_len(1024)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MediaFiles::ContentType).string_len(127).not_null())
                    .col(ColumnDef::new(MediaFiles::ByteSize).big_integer())
                    .col(
                        ColumnDef::new(MediaFiles::Status)
                            .custom(Alias::new("media_file_status"))
                            .not_null()
                            .default(Expr::cust("'pending'::media_file_status")),
                    )
                    .col(
                        ColumnDef::new(MediaFiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_files_session_id")
                            .from(MediaFiles::Table, MediaFiles::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_media_files_session_id ON media_files (session_id);
                CREATE INDEX idx_media_files_session_status ON media_files (session_id, kind, status);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MediaFiles::Table).to_owned())
            .await?;
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TYPE IF EXISTS media_kind;
                DROP TYPE IF EXISTS media_file_status;
                "#,
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MediaFiles {
    Table,
    Id,
    SessionId,
    Kind,
    ObjectKey,
    ContentType,
    ByteSize,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
}
