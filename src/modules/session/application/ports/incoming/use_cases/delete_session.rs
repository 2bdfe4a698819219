use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

#[derive(Debug, Error)]
pub enum DeleteSessionError {
    #[error("session not found or not owned by caller")]
    NotFound,
    #[error("principal lookup failed: {0}")]
    PrincipalError(String),
    #[error("database error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteSessionUseCase: Send + Sync {
    async fn execute(&self, identity: VerifiedIdentity, session_id: Uuid) -> Result<(), DeleteSessionError>;
}
