use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::MediaFile;
use crate::modules::media::application::ports::incoming::use_cases::commit_media::{
    CommitMediaError, CommitMediaUseCase,
};
use crate::modules::media::application::ports::outgoing::media_repository::{
    MediaRepository, MediaRepositoryError,
};
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;

pub struct CommitMediaService<M: MediaRepository, P: PrincipalRepository> {
    media: Arc<M>,
    principals: Arc<P>,
}

impl<M: MediaRepository, P: PrincipalRepository> CommitMediaService<M, P> {
    pub fn new(media: Arc<M>, principals: Arc<P>) -> Self {
        Self { media, principals }
    }
}

#[async_trait]
impl<M: MediaRepository, P: PrincipalRepository> CommitMediaUseCase for CommitMediaService<M, P> {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        media_id: Uuid,
        size_bytes: Option<i64>,
    ) -> Result<MediaFile, CommitMediaError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| CommitMediaError::PrincipalError(e.to_string()))?;

        self.media.commit(media_id, principal.id, size_bytes).await.map_err(|e| match e {
            MediaRepositoryError::NotFoundOrAccessDenied => CommitMediaError::NotFoundOrAccessDenied,
            other => CommitMediaError::RepositoryError(other.to_string()),
        })
    }
}
