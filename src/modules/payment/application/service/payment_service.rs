use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::payment::application::domain::catalog::find_package;
use crate::modules::payment::application::ports::incoming::use_cases::create_checkout::{
    CreateCheckoutError, CreateCheckoutInput, CreateCheckoutOutput, CreateCheckoutUseCase,
};
use crate::modules::payment::application::ports::incoming::use_cases::create_payment_intent::{
    CreatePaymentIntentError, CreatePaymentIntentInput, CreatePaymentIntentOutput,
    CreatePaymentIntentUseCase,
};
use crate::modules::payment::application::ports::incoming::use_cases::list_packages::ListPackagesUseCase;
use crate::modules::payment::application::ports::outgoing::payment_repository::{
    NewPayment, PaymentRepository,
};
use crate::modules::payment::application::ports::outgoing::payments_provider::{
    PaymentsProvider, PaymentsProviderError,
};
use crate::modules::principal::application::domain::entities::Principal;
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;

/// Resolves packages, talks to the external provider and records the
/// resulting `Payment` row. Checkout/intent creation records the row right
/// after the external create call returns (spec §4.7's "same logical
/// transaction" requirement, as close as two independent systems allow —
/// see `DESIGN.md` for the open-question decision on the failure window).
pub struct PaymentService<R: PaymentRepository, PR: PrincipalRepository, P: PaymentsProvider> {
    payments: Arc<R>,
    principals: Arc<PR>,
    provider: Arc<P>,
}

impl<R: PaymentRepository, PR: PrincipalRepository, P: PaymentsProvider> PaymentService<R, PR, P> {
    pub fn new(payments: Arc<R>, principals: Arc<PR>, provider: Arc<P>) -> Self {
        Self { payments, principals, provider }
    }

    async fn resolve_customer(&self, principal: &Principal) -> Result<String, PrincipalRepositoryErrorString> {
        if let Some(handle) = &principal.payment_customer_handle {
            return Ok(handle.clone());
        }
        // The reference deployment lazily provisions a provider-side customer
        // on first purchase; this port doesn't expose a "create customer"
        // call of its own, so the provider adapter derives a handle from the
        // principal id and we persist it for reuse.
        let handle = format!("cust_{}", principal.id);
        self.principals
            .set_payment_customer_handle(principal.id, &handle)
            .await
            .map_err(|e| PrincipalRepositoryErrorString(e.to_string()))?;
        Ok(handle)
    }
}

struct PrincipalRepositoryErrorString(String);

#[async_trait]
impl<R, PR, P> ListPackagesUseCase for PaymentService<R, PR, P>
where
    R: PaymentRepository,
    PR: PrincipalRepository,
    P: PaymentsProvider,
{
    async fn execute(&self) -> Vec<crate::modules::payment::application::domain::catalog::CreditPackage> {
        self.provider.list_packages()
    }
}

#[async_trait]
impl<R, PR, P> CreateCheckoutUseCase for PaymentService<R, PR, P>
where
    R: PaymentRepository,
    PR: PrincipalRepository,
    P: PaymentsProvider,
{
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: CreateCheckoutInput,
    ) -> Result<CreateCheckoutOutput, CreateCheckoutError> {
        let package = find_package(&input.package_id).ok_or(CreateCheckoutError::UnknownPackage)?;

        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| CreateCheckoutError::PrincipalError(e.to_string()))?;

        let customer_handle = self
            .resolve_customer(&principal)
            .await
            .map_err(|e| CreateCheckoutError::PrincipalError(e.0))?;

        let session = self
            .provider
            .create_checkout_session(
                Some(&customer_handle),
                &package,
                &input.success_url,
                &input.cancel_url,
                principal.id,
            )
            .await
            .map_err(map_provider_error_checkout)?;

        self.payments
            .insert_pending(NewPayment {
                owner_id: principal.id,
                checkout_session_handle: Some(session.checkout_session_handle),
                payment_intent_handle: None,
                amount_minor: package.price_minor,
                currency: package.currency.clone(),
                credits_granted: package.credits,
                package_id: package.id.clone(),
            })
            .await
            .map_err(|e| CreateCheckoutError::RepositoryError(e.to_string()))?;

        Ok(CreateCheckoutOutput { checkout_url: session.checkout_url })
    }
}

#[async_trait]
impl<R, PR, P> CreatePaymentIntentUseCase for PaymentService<R, PR, P>
where
    R: PaymentRepository,
    PR: PrincipalRepository,
    P: PaymentsProvider,
{
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: CreatePaymentIntentInput,
    ) -> Result<CreatePaymentIntentOutput, CreatePaymentIntentError> {
        let package = find_package(&input.package_id).ok_or(CreatePaymentIntentError::UnknownPackage)?;

        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| CreatePaymentIntentError::PrincipalError(e.to_string()))?;

        let customer_handle = self
            .resolve_customer(&principal)
            .await
            .map_err(|e| CreatePaymentIntentError::PrincipalError(e.0))?;

        let intent = self
            .provider
            .create_payment_intent(Some(&customer_handle), &package, principal.id)
            .await
            .map_err(map_provider_error_intent)?;

        self.payments
            .insert_pending(NewPayment {
                owner_id: principal.id,
                checkout_session_handle: None,
                payment_intent_handle: Some(intent.payment_intent_handle.clone()),
                amount_minor: package.price_minor,
                currency: package.currency.clone(),
                credits_granted: package.credits,
                package_id: package.id.clone(),
            })
            .await
            .map_err(|e| CreatePaymentIntentError::RepositoryError(e.to_string()))?;

        Ok(CreatePaymentIntentOutput {
            client_secret: intent.client_secret,
            payment_intent_id: intent.payment_intent_handle,
        })
    }
}

fn map_provider_error_checkout(e: PaymentsProviderError) -> CreateCheckoutError {
    CreateCheckoutError::ProviderError(e.to_string())
}

fn map_provider_error_intent(e: PaymentsProviderError) -> CreatePaymentIntentError {
    CreatePaymentIntentError::ProviderError(e.to_string())
}
