//! # Payments Table Migration
//!
//! One row per checkout attempt. `checkout_session_handle` and `payment_intent_handle`
//! are opaque identifiers handed back by the payment provider; both are nullable because
//! a row starts life with only one of them populated, and unique so a provider webhook
//! can be matched back to exactly one row.

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
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'payment_status') THEN
                        CREATE TYPE payment_status AS ENUM ('pending', 'completed', 'failed', 'refunded');
                    END IF;
                END$$;
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Payments::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Payments::CheckoutSessionHandle)
                            .string_len(255)
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::PaymentIntentHandle)
                            .string_len(255)
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Currency).string_len(3).not_null())
                    .col(ColumnDef::new(Payments::CreditsGranted).integer().not_null())
                    .col(ColumnDef::new(Payments::PackageId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Payments::Status)
                            .custom(Alias::new("payment_status"))
                            .not_null()
                            .default(Expr::cust("'pending'::payment_status")),
                    )
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Payments::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_owner_id")
                            .from(Payments::Table, Payments::OwnerId)
                            .to(Principals::Table, Principals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("CREATE INDEX idx_payments_owner_id ON payments (owner_id);")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS payment_status")
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    OwnerId,
    CheckoutSessionHandle,
    PaymentIntentHandle,
    AmountMinor,
    Currency,
    CreditsGranted,
    PackageId,
    Status,
    CreatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Principals {
    Table,
    Id,
}
