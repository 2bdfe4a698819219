use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::session::application::domain::entities::{Block, NewBlock, Session};

#[derive(Debug, Error)]
pub enum SessionRepositoryError {
    #[error("session not found or not owned by caller")]
    NotFoundOrAccessDenied,
    #[error("session is not in the `open` state")]
    StateConflict,
    #[error("database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(
        &self,
        owner: Uuid,
        session_type: &str,
        language: Option<&str>,
    ) -> Result<Session, SessionRepositoryError>;

    /// Fails with `StateConflict` unless the session is currently `open`.
    async fn append_block(
        &self,
        session_id: Uuid,
        owner: Uuid,
        block: NewBlock,
    ) -> Result<Block, SessionRepositoryError>;

    async fn get(&self, session_id: Uuid, owner: Uuid) -> Result<Option<Session>, SessionRepositoryError>;

    async fn list_blocks(
        &self,
        session_id: Uuid,
        owner: Uuid,
    ) -> Result<Vec<Block>, SessionRepositoryError>;

    /// Idempotent: a second call on an already-deleted id returns `NotFoundOrAccessDenied`.
    /// Returns the object keys of media rows that were cascade-deleted, so the
    /// caller can best-effort purge them from the object store.
    async fn delete(&self, session_id: Uuid, owner: Uuid) -> Result<Vec<String>, SessionRepositoryError>;

    /// All session ids owned by `owner`, used to scope a vector query so a
    /// reader can never match another principal's embeddings.
    async fn list_owned_ids(&self, owner: Uuid) -> Result<Vec<Uuid>, SessionRepositoryError>;
}
