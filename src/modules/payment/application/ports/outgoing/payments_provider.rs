use async_trait::async_trait;
use thiserror::Error;

use crate::modules::payment::application::domain::catalog::CreditPackage;

#[derive(Debug, Error)]
pub enum PaymentsProviderError {
    #[error("payments provider transport error: {0}")]
    Transport(String),
    #[error("webhook signature verification failed")]
    BadSignature,
    #[error("webhook secret not configured")]
    MissingSecret,
}

pub struct CheckoutSession {
    pub checkout_url: String,
    pub checkout_session_handle: String,
}

pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_handle: String,
}

/// An event the provider delivered over its webhook, already verified and
/// decoded (spec §4.7's four recognized types, everything else folded into
/// `Other`).
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    CheckoutCompleted { checkout_session_handle: String },
    PaymentIntentSucceeded { payment_intent_handle: String },
    CheckoutExpired { checkout_session_handle: String },
    PaymentIntentFailed { payment_intent_handle: String },
    Other(String),
}

/// External collaborator for hosted checkout / payment intents, kept
/// black-box the same way `IdentityVerifier` is (spec §1). Implementations
/// own the HTTP round trip and the webhook signature scheme; the rest of the
/// module only ever sees `WebhookEvent` and the handles it returns.
#[async_trait]
pub trait PaymentsProvider: Send + Sync {
    fn list_packages(&self) -> Vec<CreditPackage>;

    async fn create_checkout_session(
        &self,
        customer_handle: Option<&str>,
        package: &CreditPackage,
        success_url: &str,
        cancel_url: &str,
        owner_id: uuid::Uuid,
    ) -> Result<CheckoutSession, PaymentsProviderError>;

    async fn create_payment_intent(
        &self,
        customer_handle: Option<&str>,
        package: &CreditPackage,
        owner_id: uuid::Uuid,
    ) -> Result<PaymentIntent, PaymentsProviderError>;

    /// Verifies `signature_header` against `payload` and decodes the event.
    fn verify_and_parse_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, PaymentsProviderError>;
}
