use async_trait::async_trait;

use crate::modules::principal::application::ports::incoming::use_cases::get_me::{
    GetMeError, GetMeUseCase, MeOutput,
};
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::{
    PrincipalRepository, PrincipalRepositoryError,
};
use crate::modules::principal::application::services::resolve_principal::resolve_principal;

pub struct GetMeService<R: PrincipalRepository> {
    principal_repository: R,
}

impl<R: PrincipalRepository> GetMeService<R> {
    pub fn new(principal_repository: R) -> Self {
        Self {
            principal_repository,
        }
    }
}

#[async_trait]
impl<R: PrincipalRepository> GetMeUseCase for GetMeService<R> {
    async fn execute(&self, identity: VerifiedIdentity) -> Result<MeOutput, GetMeError> {
        let principal = resolve_principal(&self.principal_repository, &identity)
            .await
            .map_err(map_error)?;

        Ok(MeOutput {
            credits: principal.credits,
            preferred_language: principal.preferred_language,
        })
    }
}

fn map_error(e: PrincipalRepositoryError) -> GetMeError {
    GetMeError::RepositoryError(e.to_string())
}
