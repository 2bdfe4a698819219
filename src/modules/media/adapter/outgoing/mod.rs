pub mod media_repository_postgres;
pub mod object_store_cleanup_bridge;
pub mod object_store_s3;
pub mod sea_orm_entity;
