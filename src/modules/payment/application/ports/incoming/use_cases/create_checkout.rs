use async_trait::async_trait;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

pub struct CreateCheckoutInput {
    pub package_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, serde::Serialize)]
pub struct CreateCheckoutOutput {
    pub checkout_url: String,
}

#[derive(Debug)]
pub enum CreateCheckoutError {
    UnknownPackage,
    PrincipalError(String),
    RepositoryError(String),
    ProviderError(String),
}

#[async_trait]
pub trait CreateCheckoutUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: CreateCheckoutInput,
    ) -> Result<CreateCheckoutOutput, CreateCheckoutError>;
}
