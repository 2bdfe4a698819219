//! # Sessions Table Migration
//!
//! A session is the user-scoped container for one capture event. Status is a strict
//! forward-only enum (`open → pending_processing|no_credits → processing → processed|failed`);
//! every mutation path re-checks the current status before writing, which is what makes
//! concurrent finalize attempts safe (see the credit ledger's conditional debit).

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
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'session_status') THEN
                        CREATE TYPE session_status AS ENUM
                            ('open', 'pending_processing', 'processing', 'processed', 'no_credits', 'failed');
                    END IF;
                END$$;
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Sessions::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Sessions::SessionType).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Sessions::Status)
                            .custom(Alias::new("session_status"))
                            .not_null()
                            .default(Expr::cust("'open'::session_status")),
                    )
                    .col(ColumnDef::new(Sessions::AiSummary).text())
                    .col(ColumnDef::new(Sessions::SuggestedTitle).string_len(120))
                    .col(ColumnDef::new(Sessions::CaptureLanguage).string_len(2))
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Sessions::FinalizedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Sessions::ProcessedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_owner_id")
                            .from(Sessions::Table, Sessions::OwnerId)
                            .to(Principals::Table, Principals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_sessions_owner_id ON sessions (owner_id);
                CREATE INDEX idx_sessions_owner_status ON sessions (owner_id, status);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_sessions_updated_at
                BEFORE UPDATE ON sessions
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_sessions_updated_at ON sessions")
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS session_status")
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    OwnerId,
    SessionType,
    Status,
    AiSummary,
    SuggestedTitle,
    CaptureLanguage,
    CreatedAt,
    UpdatedAt,
    FinalizedAt,
    ProcessedAt,
}

#[derive(DeriveIden)]
enum Principals {
    Table,
    Id,
}
