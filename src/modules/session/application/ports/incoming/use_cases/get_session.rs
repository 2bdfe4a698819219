use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::session::application::domain::entities::{Block, Session};

#[derive(Debug, Error)]
pub enum GetSessionError {
    #[error("session not found or not owned by caller")]
    NotFound,
    #[error("principal lookup failed: {0}")]
    PrincipalError(String),
    #[error("database error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetSessionUseCase: Send + Sync {
    async fn execute(&self, identity: VerifiedIdentity, session_id: Uuid) -> Result<Session, GetSessionError>;
}

#[async_trait]
pub trait ListBlocksUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
    ) -> Result<Vec<Block>, GetSessionError>;
}
