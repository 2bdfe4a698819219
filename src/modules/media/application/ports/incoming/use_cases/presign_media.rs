use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::MediaKind;
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

pub struct PresignMediaInput {
    pub session_id: Uuid,
    pub kind: MediaKind,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct PresignMediaOutput {
    pub upload_url: String,
    pub object_key: String,
    pub media_id: Uuid,
    pub expires_in: u64,
}

#[derive(Debug)]
pub enum PresignMediaError {
    SessionNotFoundOrAccessDenied,
    ContentTypeNotAllowed,
    PrincipalError(String),
    RepositoryError(String),
    GatewayError(String),
}

#[async_trait]
pub trait PresignMediaUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: PresignMediaInput,
    ) -> Result<PresignMediaOutput, PresignMediaError>;
}
