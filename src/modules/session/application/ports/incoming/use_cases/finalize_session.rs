use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::session::application::domain::entities::SessionStatus;

/// Cost, in credits, of one finalize-with-AI attempt. Grounded on the
/// source's `SESSION_PROCESSING_COST = 1`.
pub const SESSION_PROCESSING_COST: i32 = 1;

#[derive(Debug, Serialize)]
pub struct FinalizeSessionOutput {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Error)]
pub enum FinalizeSessionError {
    #[error("session not found or not owned by caller")]
    NotFoundOrAccessDenied,
    #[error("session is not open")]
    StateConflict,
    #[error("session has no blocks")]
    NoBlocks,
    #[error("principal lookup failed: {0}")]
    PrincipalError(String),
    #[error("database error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait FinalizeSessionUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
    ) -> Result<FinalizeSessionOutput, FinalizeSessionError>;
}
