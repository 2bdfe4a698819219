//! # AI Jobs `locked_at` Column Migration
//!
//! Backs the worker's claim statement: a single `UPDATE ... WHERE id = (SELECT
//! ... FOR UPDATE SKIP LOCKED) RETURNING ...` is the canonical Postgres queue-claim
//! idiom and needs a column to stamp, since `ai_jobs.status` only distinguishes
//! `pending`/`completed`/`failed` and has no in-flight state of its own.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(AiJobs::Table)
                    .add_column(ColumnDef::new(AiJobs::LockedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(AiJobs::Table)
                    .drop_column(AiJobs::LockedAt)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum AiJobs {
    Table,
    LockedAt,
}
