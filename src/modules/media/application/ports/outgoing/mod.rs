pub mod media_repository;
pub mod object_store_gateway;
