pub mod append_block_service;
pub mod create_session_service;
pub mod delete_session_service;
pub mod finalize_session_service;
pub mod get_session_service;
