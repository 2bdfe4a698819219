use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::session::application::domain::entities::{Block, BlockType, Session};

#[derive(Debug, Clone, Error)]
pub enum PipelineRepositoryError {
    #[error("database error: {0}")]
    Database(String),
}

/// A privileged claimed-job row: the worker owns it until it calls
/// `complete_job` or `fail_job`.
#[derive(Debug, Clone)]
pub struct ClaimedJob {
    pub job_id: Uuid,
    pub session_id: Uuid,
    pub owner_id: Uuid,
}

/// Write path used only by the pipeline worker. Unlike
/// `modules::session`'s `SessionRepository`, these writes are never gated on
/// the session being `open` — the worker writes while the session is
/// `processing`.
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    /// Claims one pending job for exclusive processing, returning `None` if
    /// none are pending. Implementations must use a row-locking read
    /// (`SELECT ... FOR UPDATE SKIP LOCKED`) so two workers never claim the
    /// same job.
    async fn claim_pending_job(&self) -> Result<Option<ClaimedJob>, PipelineRepositoryError>;

    async fn set_session_status(
        &self,
        session_id: Uuid,
        status: &str,
    ) -> Result<(), PipelineRepositoryError>;

    async fn append_pipeline_block(
        &self,
        session_id: Uuid,
        block_type: BlockType,
        text_content: Option<&str>,
        media_object_key: Option<&str>,
    ) -> Result<Block, PipelineRepositoryError>;

    async fn list_blocks(&self, session_id: Uuid) -> Result<Vec<Block>, PipelineRepositoryError>;

    async fn get_session(&self, session_id: Uuid) -> Result<Option<Session>, PipelineRepositoryError>;

    async fn set_summary_and_title(
        &self,
        session_id: Uuid,
        summary: &str,
        title: &str,
    ) -> Result<(), PipelineRepositoryError>;

    async fn complete_job(&self, job_id: Uuid, session_id: Uuid) -> Result<(), PipelineRepositoryError>;

    async fn fail_job(&self, job_id: Uuid, session_id: Uuid) -> Result<(), PipelineRepositoryError>;
}
