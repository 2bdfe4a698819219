pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_principals_table;
mod m20260301_000002_create_sessions_table;
mod m20260301_000003_create_blocks_table;
mod m20260301_000004_create_media_files_table;
mod m20260301_000005_create_ai_jobs_table;
mod m20260301_000006_create_embeddings_table;
mod m20260301_000007_create_payments_table;
mod m20260301_000008_add_locked_at_to_ai_jobs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_principals_table::Migration),
            Box::new(m20260301_000002_create_sessions_table::Migration),
            Box::new(m20260301_000003_create_blocks_table::Migration),
            Box::new(m20260301_000004_create_media_files_table::Migration),
            Box::new(m20260301_000005_create_ai_jobs_table::Migration),
            Box::new(m20260301_000006_create_embeddings_table::Migration),
            Box::new(m20260301_000007_create_payments_table::Migration),
            Box::new(m20260301_000008_add_locked_at_to_ai_jobs::Migration),
        ]
    }
}
