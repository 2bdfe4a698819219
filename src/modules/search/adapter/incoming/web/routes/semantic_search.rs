use actix_web::{post, web, Responder};
use serde::Deserialize;

use crate::modules::principal::adapter::incoming::web::extractors::verified_identity::VerifiedIdentity;
use crate::modules::search::application::ports::incoming::use_cases::semantic_search::{
    SemanticSearchError, SemanticSearchInput,
};
use crate::shared::api::response::ApiResponse;
use crate::AppState;

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_MIN_SIMILARITY: f32 = 0.0;

#[derive(Deserialize)]
pub struct SemanticSearchQuery {
    pub query: String,
    pub limit: Option<usize>,
    pub threshold: Option<f32>,
}

#[post("/search/semantic")]
pub async fn semantic_search_handler(
    identity: VerifiedIdentity,
    query: web::Query<SemanticSearchQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let input = SemanticSearchInput {
        query: query.query,
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
        min_similarity: query.threshold.unwrap_or(DEFAULT_MIN_SIMILARITY),
    };

    match data.semantic_search_use_case.execute(identity, input).await {
        Ok(hits) => ApiResponse::success(serde_json::json!({ "results": hits })),
        Err(SemanticSearchError::EmptyQuery) => {
            ApiResponse::<()>::bad_request("EMPTY_QUERY", "query must not be empty")
        }
        Err(SemanticSearchError::PrincipalError(msg))
        | Err(SemanticSearchError::ProviderError(msg))
        | Err(SemanticSearchError::VectorIndexError(msg)) => {
            tracing::error!("semantic search failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}
