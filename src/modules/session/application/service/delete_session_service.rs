use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::session::application::ports::incoming::use_cases::delete_session::{
    DeleteSessionError, DeleteSessionUseCase,
};
use crate::modules::session::application::ports::outgoing::object_store_cleanup::ObjectStoreCleanup;
use crate::modules::session::application::ports::outgoing::session_repository::{
    SessionRepository, SessionRepositoryError,
};

pub struct DeleteSessionService<R: SessionRepository, P: PrincipalRepository, C: ObjectStoreCleanup> {
    repo: Arc<R>,
    principals: Arc<P>,
    cleanup: Arc<C>,
}

impl<R: SessionRepository, P: PrincipalRepository, C: ObjectStoreCleanup> DeleteSessionService<R, P, C> {
    pub fn new(repo: Arc<R>, principals: Arc<P>, cleanup: Arc<C>) -> Self {
        Self { repo, principals, cleanup }
    }
}

#[async_trait]
impl<R: SessionRepository, P: PrincipalRepository, C: ObjectStoreCleanup> DeleteSessionUseCase
    for DeleteSessionService<R, P, C>
{
    async fn execute(&self, identity: VerifiedIdentity, session_id: Uuid) -> Result<(), DeleteSessionError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| DeleteSessionError::PrincipalError(e.to_string()))?;

        let object_keys = self
            .repo
            .delete(session_id, principal.id)
            .await
            .map_err(|e| match e {
                SessionRepositoryError::NotFoundOrAccessDenied => DeleteSessionError::NotFound,
                other => DeleteSessionError::RepositoryError(other.to_string()),
            })?;

        if !object_keys.is_empty() {
            self.cleanup.delete_many(object_keys).await;
        }

        Ok(())
    }
}
