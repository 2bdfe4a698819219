pub mod sea_orm_entity;
pub mod vector_index_postgres;
