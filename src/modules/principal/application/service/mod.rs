pub mod get_me_service;
pub mod set_preferred_language_service;
pub mod set_push_token_service;
