use async_trait::async_trait;
use thiserror::Error;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::session::application::domain::entities::Session;

#[derive(Debug, Error)]
pub enum CreateSessionError {
    #[error("principal lookup failed: {0}")]
    PrincipalError(String),
    #[error("database error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateSessionUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_type: String,
        language: Option<String>,
    ) -> Result<Session, CreateSessionError>;
}
