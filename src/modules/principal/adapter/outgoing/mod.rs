pub mod jwt_identity_verifier;
pub mod principal_repository_postgres;
pub mod sea_orm_entity;
