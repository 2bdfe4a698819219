use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::modules::media::application::domain::upload_policy::{ContentTypeError, UploadPolicy};
use crate::modules::media::application::ports::incoming::use_cases::presign_media::{
    PresignMediaError, PresignMediaInput, PresignMediaOutput, PresignMediaUseCase,
};
use crate::modules::media::application::ports::outgoing::media_repository::{
    MediaRepository, MediaRepositoryError,
};
use crate::modules::media::application::ports::outgoing::object_store_gateway::ObjectStoreGateway;
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::session::application::ports::outgoing::session_repository::SessionRepository;

pub struct PresignMediaService<
    M: MediaRepository,
    G: ObjectStoreGateway,
    S: SessionRepository,
    P: PrincipalRepository,
> {
    media: Arc<M>,
    gateway: Arc<G>,
    sessions: Arc<S>,
    principals: Arc<P>,
    policy: UploadPolicy,
    put_ttl: Duration,
}

impl<M: MediaRepository, G: ObjectStoreGateway, S: SessionRepository, P: PrincipalRepository>
    PresignMediaService<M, G, S, P>
{
    pub fn new(
        media: Arc<M>,
        gateway: Arc<G>,
        sessions: Arc<S>,
        principals: Arc<P>,
        policy: UploadPolicy,
        put_ttl: Duration,
    ) -> Self {
        Self { media, gateway, sessions, principals, policy, put_ttl }
    }
}

#[async_trait]
impl<M: MediaRepository, G: ObjectStoreGateway, S: SessionRepository, P: PrincipalRepository>
    PresignMediaUseCase for PresignMediaService<M, G, S, P>
{
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: PresignMediaInput,
    ) -> Result<PresignMediaOutput, PresignMediaError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| PresignMediaError::PrincipalError(e.to_string()))?;

        let session = self
            .sessions
            .get(input.session_id, principal.id)
            .await
            .map_err(|e| PresignMediaError::RepositoryError(e.to_string()))?
            .ok_or(PresignMediaError::SessionNotFoundOrAccessDenied)?;

        let extension = self
            .policy
            .extension_for(input.kind, &input.content_type)
            .map_err(|ContentTypeError::NotAllowedForKind(_)| PresignMediaError::ContentTypeNotAllowed)?;

        let object_key = self.policy.derive_object_key(session.id, input.kind, extension);

        let upload_url = self
            .gateway
            .presign_put(&object_key, &input.content_type, self.put_ttl)
            .await
            .map_err(|e| PresignMediaError::GatewayError(e.to_string()))?;

        let media = self
            .media
            .insert_pending(session.id, input.kind, &object_key, &input.content_type)
            .await
            .map_err(|e: MediaRepositoryError| PresignMediaError::RepositoryError(e.to_string()))?;

        Ok(PresignMediaOutput {
            upload_url,
            object_key: media.object_key,
            media_id: media.id,
            expires_in: self.put_ttl.as_secs(),
        })
    }
}
