use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

#[derive(Debug)]
pub enum DeleteMediaError {
    NotFound,
    PrincipalError(String),
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteMediaUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
        media_id: Uuid,
    ) -> Result<(), DeleteMediaError>;
}
