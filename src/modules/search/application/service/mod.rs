pub mod semantic_search_service;
