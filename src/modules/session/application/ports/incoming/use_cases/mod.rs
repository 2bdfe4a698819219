pub mod append_block;
pub mod create_session;
pub mod delete_session;
pub mod finalize_session;
pub mod get_session;
