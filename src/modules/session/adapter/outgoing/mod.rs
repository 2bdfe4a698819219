pub mod finalize_transaction_postgres;
pub mod sea_orm_entity;
pub mod session_repository_postgres;
