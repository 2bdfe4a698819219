//! # Blocks Table Migration
//!
//! Blocks are ordered (by `created_at`) content units inside a session. `transcription_backend`
//! and `image_description` rows are appended only by the pipeline worker, never by the client.

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
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'block_type') THEN
                        CREATE TYPE block_type AS ENUM
                            ('text', 'voice', 'image', 'marker', 'transcription_backend', 'image_description');
                    END IF;
                END$$;
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Blocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Blocks::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Blocks::SessionId).uuid().not_null())
                    .col(
                        ColumnDef::new(Blocks::BlockType)
                            .custom(Alias::new("block_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Blocks::TextContent).text())
                    .col(ColumnDef::new(Blocks::MediaObjectKey).string_len(1024))
                    .col(
                        ColumnDef::new(Blocks::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Blocks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blocks_session_id")
                            .from(Blocks::Table, Blocks::SessionId)
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
                CREATE INDEX idx_blocks_session_id_created_at ON blocks (session_id, created_at);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Blocks::Table).to_owned())
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS block_type")
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Blocks {
    Table,
    Id,
    SessionId,
    BlockType,
    TextContent,
    MediaObjectKey,
    Metadata,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
}
