use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::vector::application::domain::entities::VectorMatch;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VectorIndexError {
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("vector store error: {0}")]
    Database(String),
}

/// Scopes a query to a caller-provided set of session ids; the adapter never
/// infers ownership on its own.
pub struct VectorQuery<'a> {
    pub embedding: &'a [f32],
    pub session_ids: &'a [Uuid],
    pub provider: Option<&'a str>,
    pub top_k: usize,
    pub min_similarity: f32,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Inserts a chunk embedding. Rejects vectors whose dimension does not
    /// match the index's configured dimension.
    async fn upsert(
        &self,
        session_id: Uuid,
        block_id: Option<Uuid>,
        provider: &str,
        chunk_text: &str,
        embedding: &[f32],
    ) -> Result<Uuid, VectorIndexError>;

    /// Deletes every embedding row belonging to `session_id`.
    async fn delete_by_session(&self, session_id: Uuid) -> Result<(), VectorIndexError>;

    /// Orders by cosine distance ascending, converting `min_similarity` (a
    /// value in [0, 1]) to `max_distance = 1 - min_similarity` internally.
    async fn query(&self, query: VectorQuery<'_>) -> Result<Vec<VectorMatch>, VectorIndexError>;
}
