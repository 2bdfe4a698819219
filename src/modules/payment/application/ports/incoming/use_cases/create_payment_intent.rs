use async_trait::async_trait;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

pub struct CreatePaymentIntentInput {
    pub package_id: String,
}

#[derive(Debug, serde::Serialize)]
pub struct CreatePaymentIntentOutput {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Debug)]
pub enum CreatePaymentIntentError {
    UnknownPackage,
    PrincipalError(String),
    RepositoryError(String),
    ProviderError(String),
}

#[async_trait]
pub trait CreatePaymentIntentUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: CreatePaymentIntentInput,
    ) -> Result<CreatePaymentIntentOutput, CreatePaymentIntentError>;
}
