use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::MediaFile;
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

#[derive(Debug)]
pub enum CommitMediaError {
    NotFoundOrAccessDenied,
    PrincipalError(String),
    RepositoryError(String),
}

#[async_trait]
pub trait CommitMediaUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        media_id: Uuid,
        size_bytes: Option<i64>,
    ) -> Result<MediaFile, CommitMediaError>;
}
