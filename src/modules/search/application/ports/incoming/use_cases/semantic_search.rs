use async_trait::async_trait;
use std::fmt;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::search::application::domain::entities::SearchHit;

#[derive(Debug, Clone)]
pub struct SemanticSearchInput {
    pub query: String,
    pub limit: usize,
    pub min_similarity: f32,
}

#[derive(Debug, Clone)]
pub enum SemanticSearchError {
    EmptyQuery,
    PrincipalError(String),
    ProviderError(String),
    VectorIndexError(String),
}

impl fmt::Display for SemanticSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticSearchError::EmptyQuery => write!(f, "query must not be empty"),
            SemanticSearchError::PrincipalError(msg) => write!(f, "principal error: {msg}"),
            SemanticSearchError::ProviderError(msg) => write!(f, "provider error: {msg}"),
            SemanticSearchError::VectorIndexError(msg) => write!(f, "vector index error: {msg}"),
        }
    }
}

#[async_trait]
pub trait SemanticSearchUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: SemanticSearchInput,
    ) -> Result<Vec<SearchHit>, SemanticSearchError>;
}
