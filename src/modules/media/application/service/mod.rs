pub mod commit_media_service;
pub mod delete_media_service;
pub mod presign_media_service;
