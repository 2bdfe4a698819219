//! # Embeddings Table Migration
//!
//! Chunk-level semantic vectors, fixed at dimension 1536. Requires the `pgvector`
//! Postgres extension for the `vector` column type and its `<=>` cosine-distance
//! operator; sea-orm's schema builder has no `vector` column kind so the column and
//! its index are created with raw SQL, matching the teacher's own convention of
//! dropping to `execute_unprepared` for anything outside the common column types
//! (see the `media` migration's enum/trigger blocks).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE EXTENSION IF NOT EXISTS vector")
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Embeddings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Embeddings::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Embeddings::SessionId).uuid().not_null())
                    .col(ColumnDef::new(Embeddings::BlockId).uuid())
                    .col(ColumnDef::new(Embeddings::Provider).string_len(64).not_null())
                    .col(ColumnDef::new(Embeddings::ChunkText).text().not_null())
                    .col(
                        ColumnDef::new(Embeddings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_embeddings_session_id")
                            .from(Embeddings::Table, Embeddings::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_embeddings_block_id")
                            .from(Embeddings::Table, Embeddings::BlockId)
                            .to(Blocks::Table, Blocks::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE embeddings ADD COLUMN embedding vector(1536) NOT NULL;

                CREATE INDEX idx_embeddings_session_id ON embeddings (session_id);

                -- approximate nearest-neighbor index on cosine distance; scoping by
                -- session_id happens in the WHERE clause of the query, not the index.
                CREATE INDEX idx_embeddings_vector_cosine
                ON embeddings USING ivfflat (embedding vector_cosine_ops)
                WITH (lists = 100);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Embeddings::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Embeddings {
    Table,
    Id,
    SessionId,
    BlockId,
    Provider,
    ChunkText,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Blocks {
    Table,
    Id,
}
