use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::session::application::domain::entities::Session;
use crate::modules::session::application::ports::incoming::use_cases::create_session::{
    CreateSessionError, CreateSessionUseCase,
};
use crate::modules::session::application::ports::outgoing::session_repository::{
    SessionRepository, SessionRepositoryError,
};

pub struct CreateSessionService<R: SessionRepository, P: PrincipalRepository> {
    repo: Arc<R>,
    principals: Arc<P>,
}

impl<R: SessionRepository, P: PrincipalRepository> CreateSessionService<R, P> {
    pub fn new(repo: Arc<R>, principals: Arc<P>) -> Self {
        Self { repo, principals }
    }
}

#[async_trait]
impl<R: SessionRepository, P: PrincipalRepository> CreateSessionUseCase for CreateSessionService<R, P> {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_type: String,
        language: Option<String>,
    ) -> Result<Session, CreateSessionError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| CreateSessionError::PrincipalError(e.to_string()))?;

        self.repo
            .create(principal.id, &session_type, language.as_deref())
            .await
            .map_err(|e| match e {
                SessionRepositoryError::Database(msg) => CreateSessionError::RepositoryError(msg),
                other => CreateSessionError::RepositoryError(other.to_string()),
            })
    }
}
