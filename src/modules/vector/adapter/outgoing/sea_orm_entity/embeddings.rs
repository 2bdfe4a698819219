use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// Structural parity only; the `embedding` column has no sea-orm column kind
/// and every read/write against it goes through raw SQL in the Postgres
/// adapter.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "embeddings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub session_id: Uuid,
    pub block_id: Option<Uuid>,
    pub provider: String,
    pub chunk_text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
