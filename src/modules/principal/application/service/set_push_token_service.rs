use async_trait::async_trait;

use crate::modules::principal::application::ports::incoming::use_cases::set_push_token::{
    SetPushTokenError, SetPushTokenUseCase,
};
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::{
    PrincipalRepository, PrincipalRepositoryError,
};
use crate::modules::principal::application::services::resolve_principal::resolve_principal;

pub struct SetPushTokenService<R: PrincipalRepository> {
    principal_repository: R,
}

impl<R: PrincipalRepository> SetPushTokenService<R> {
    pub fn new(principal_repository: R) -> Self {
        Self {
            principal_repository,
        }
    }
}

#[async_trait]
impl<R: PrincipalRepository> SetPushTokenUseCase for SetPushTokenService<R> {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        token: String,
    ) -> Result<(), SetPushTokenError> {
        let principal = resolve_principal(&self.principal_repository, &identity)
            .await
            .map_err(|e| SetPushTokenError::RepositoryError(e.to_string()))?;

        self.principal_repository
            .set_push_token(principal.id, &token)
            .await
            .map_err(map_error)
    }
}

fn map_error(e: PrincipalRepositoryError) -> SetPushTokenError {
    SetPushTokenError::RepositoryError(e.to_string())
}
