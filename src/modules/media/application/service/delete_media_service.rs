use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::media::application::ports::incoming::use_cases::delete_media::{
    DeleteMediaError, DeleteMediaUseCase,
};
use crate::modules::media::application::ports::outgoing::media_repository::{
    MediaRepository, MediaRepositoryError,
};
use crate::modules::media::application::ports::outgoing::object_store_gateway::ObjectStoreGateway;
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;

pub struct DeleteMediaService<M: MediaRepository, G: ObjectStoreGateway, P: PrincipalRepository> {
    media: Arc<M>,
    gateway: Arc<G>,
    principals: Arc<P>,
}

impl<M: MediaRepository, G: ObjectStoreGateway, P: PrincipalRepository> DeleteMediaService<M, G, P> {
    pub fn new(media: Arc<M>, gateway: Arc<G>, principals: Arc<P>) -> Self {
        Self { media, gateway, principals }
    }
}

#[async_trait]
impl<M: MediaRepository, G: ObjectStoreGateway, P: PrincipalRepository> DeleteMediaUseCase
    for DeleteMediaService<M, G, P>
{
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
        media_id: Uuid,
    ) -> Result<(), DeleteMediaError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| DeleteMediaError::PrincipalError(e.to_string()))?;

        let existing = self.media.get(media_id, principal.id).await.map_err(|e| match e {
            MediaRepositoryError::NotFoundOrAccessDenied => DeleteMediaError::NotFound,
            other => DeleteMediaError::RepositoryError(other.to_string()),
        })?;

        if existing.session_id != session_id {
            return Err(DeleteMediaError::NotFound);
        }

        let object_key = self.media.delete(media_id, principal.id).await.map_err(|e| match e {
            MediaRepositoryError::NotFoundOrAccessDenied => DeleteMediaError::NotFound,
            other => DeleteMediaError::RepositoryError(other.to_string()),
        })?;

        // best-effort: the media row is already gone regardless of gateway outcome
        let _ = self.gateway.delete(&object_key).await;

        Ok(())
    }
}
