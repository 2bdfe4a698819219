use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::session::application::domain::entities::{Block, BlockType};

pub struct AppendBlockInput {
    pub block_type: BlockType,
    pub text_content: Option<String>,
    pub media_object_key: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum AppendBlockError {
    #[error("block type `{0:?}` may only be appended by the pipeline")]
    ClientCannotAppendType(BlockType),
    #[error("session not found or not owned by caller")]
    NotFoundOrAccessDenied,
    #[error("session is not open")]
    StateConflict,
    #[error("principal lookup failed: {0}")]
    PrincipalError(String),
    #[error("database error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait AppendBlockUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
        input: AppendBlockInput,
    ) -> Result<Block, AppendBlockError>;
}
