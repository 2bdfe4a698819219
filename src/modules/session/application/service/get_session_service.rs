use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::session::application::domain::entities::{Block, Session};
use crate::modules::session::application::ports::incoming::use_cases::get_session::{
    GetSessionError, GetSessionUseCase, ListBlocksUseCase,
};
use crate::modules::session::application::ports::outgoing::session_repository::{
    SessionRepository, SessionRepositoryError,
};

pub struct GetSessionService<R: SessionRepository, P: PrincipalRepository> {
    repo: Arc<R>,
    principals: Arc<P>,
}

impl<R: SessionRepository, P: PrincipalRepository> GetSessionService<R, P> {
    pub fn new(repo: Arc<R>, principals: Arc<P>) -> Self {
        Self { repo, principals }
    }
}

#[async_trait]
impl<R: SessionRepository, P: PrincipalRepository> GetSessionUseCase for GetSessionService<R, P> {
    async fn execute(&self, identity: VerifiedIdentity, session_id: Uuid) -> Result<Session, GetSessionError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| GetSessionError::PrincipalError(e.to_string()))?;

        self.repo
            .get(session_id, principal.id)
            .await
            .map_err(|e| GetSessionError::RepositoryError(e.to_string()))?
            .ok_or(GetSessionError::NotFound)
    }
}

#[async_trait]
impl<R: SessionRepository, P: PrincipalRepository> ListBlocksUseCase for GetSessionService<R, P> {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
    ) -> Result<Vec<Block>, GetSessionError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| GetSessionError::PrincipalError(e.to_string()))?;

        self.repo
            .list_blocks(session_id, principal.id)
            .await
            .map_err(|e| match e {
                SessionRepositoryError::NotFoundOrAccessDenied => GetSessionError::NotFound,
                other => GetSessionError::RepositoryError(other.to_string()),
            })
    }
}
