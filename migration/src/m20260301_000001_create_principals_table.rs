//! # Principals Table Migration
//!
//! `principals` is the single identity row per authenticated user. The `external_subject`
//! column is the opaque handle returned by the external identity verifier (`verify(token) →
//! {subject, email}`) — the core never issues or owns identity tokens itself, it only
//! indexes by whatever stable subject string the verifier hands back.
//!
//! `credits` is mutated exclusively through the credit ledger's conditional update
//! (`balance = balance - n WHERE balance >= n`); no other write path should touch it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Principals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Principals::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(Principals::ExternalSubject)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Principals::Email).string_len(255))
                    .col(
                        ColumnDef::new(Principals::Credits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Principals::PushToken).string_len(4096))
                    .col(
                        ColumnDef::new(Principals::PreferredLanguage)
                            .string_len(2)
                            .not_null()
                            .default("pt"),
                    )
                    .col(
                        ColumnDef::new(Principals::PaymentCustomerHandle)
                            .string_len(255)
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Principals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Principals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = CURRENT_TIMESTAMP;
                    RETURN NEW;
                END;
                $$ language 'plpgsql';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_principals_updated_at
                BEFORE UPDATE ON principals
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        // credits must never go negative; belt-and-braces alongside the conditional
        // UPDATE the ledger issues.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE principals ADD CONSTRAINT chk_principals_credits_nonnegative
                CHECK (credits >= 0);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_principals_updated_at ON principals")
            .await?;
        manager
            .drop_table(Table::drop().table(Principals::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Principals {
    Table,
    Id,
    ExternalSubject,
    Email,
    Credits,
    PushToken,
    PreferredLanguage,
    PaymentCustomerHandle,
    CreatedAt,
    UpdatedAt,
}
