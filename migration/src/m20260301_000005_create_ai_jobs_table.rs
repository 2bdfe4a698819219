//! # AI Jobs Table Migration
//!
//! One row per pipeline run. At most one non-terminal (`pending`) job per session is
//! enforced by a partial unique index rather than application-level locking, so the
//! invariant holds even under concurrent enqueue attempts.

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
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'ai_job_status') THEN
                        CREATE TYPE ai_job_status AS ENUM ('pending', 'completed', 'failed');
                    END IF;
                END$$;
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AiJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(AiJobs::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(AiJobs::SessionId).uuid().not_null())
                    .col(
                        ColumnDef::new(AiJobs::JobType)
                            .string_len(64)
                            .not_null()
                            .default("session_pipeline"),
                    )
                    .col(
                        ColumnDef::new(AiJobs::CreditsUsed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AiJobs::Status)
                            .custom(Alias::new("ai_job_status"))
                            .not_null()
                            .default(Expr::cust("'pending'::ai_job_status")),
                    )
                    .col(
                        ColumnDef::new(AiJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AiJobs::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_jobs_owner_id")
                            .from(AiJobs::Table, AiJobs::OwnerId)
                            .to(Principals::Table, Principals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_jobs_session_id")
                            .from(AiJobs::Table, AiJobs::SessionId)
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
                CREATE UNIQUE INDEX idx_ai_jobs_one_active_per_session
                ON ai_jobs (session_id)
                WHERE status = 'pending';

                CREATE INDEX idx_ai_jobs_owner_id ON ai_jobs (owner_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiJobs::Table).to_owned())
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS ai_job_status")
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AiJobs {
    Table,
    Id,
    OwnerId,
    SessionId,
    JobType,
    CreditsUsed,
    Status,
    CreatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Principals {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
}
