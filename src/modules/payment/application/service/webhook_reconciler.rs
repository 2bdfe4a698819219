use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::credit::application::ports::outgoing::credit_ledger::CreditLedger;
use crate::modules::payment::application::ports::incoming::use_cases::handle_webhook::{
    HandleWebhookError, HandleWebhookUseCase, ReconcileOutcome,
};
use crate::modules::payment::application::ports::outgoing::payment_repository::PaymentRepository;
use crate::modules::payment::application::ports::outgoing::payments_provider::{
    PaymentsProvider, PaymentsProviderError, WebhookEvent,
};

/// Spec §4.7's four-event state machine. Only ever reached through a
/// verified payload; everything before `verify_and_parse_webhook` succeeds
/// is untrusted input.
pub struct WebhookReconciler<R: PaymentRepository, P: PaymentsProvider, L: CreditLedger> {
    payments: Arc<R>,
    provider: Arc<P>,
    ledger: Arc<L>,
}

impl<R: PaymentRepository, P: PaymentsProvider, L: CreditLedger> WebhookReconciler<R, P, L> {
    pub fn new(payments: Arc<R>, provider: Arc<P>, ledger: Arc<L>) -> Self {
        Self { payments, provider, ledger }
    }
}

#[async_trait]
impl<R, P, L> HandleWebhookUseCase for WebhookReconciler<R, P, L>
where
    R: PaymentRepository,
    P: PaymentsProvider,
    L: CreditLedger,
{
    async fn execute(
        &self,
        provider: &str,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<ReconcileOutcome, HandleWebhookError> {
        if provider != "stripe" {
            return Err(HandleWebhookError::UnknownProvider);
        }

        let event = self
            .provider
            .verify_and_parse_webhook(payload, signature_header)
            .map_err(map_provider_error)?;

        match event {
            WebhookEvent::CheckoutCompleted { checkout_session_handle } => {
                self.credit_once(self.payments.complete_by_checkout_handle(&checkout_session_handle).await)
                    .await
            }
            WebhookEvent::PaymentIntentSucceeded { payment_intent_handle } => {
                self.credit_once(self.payments.complete_by_intent_handle(&payment_intent_handle).await)
                    .await
            }
            WebhookEvent::CheckoutExpired { checkout_session_handle } => {
                tracing::info!(handle = %checkout_session_handle, "checkout session expired");
                Ok(ReconcileOutcome::Logged)
            }
            WebhookEvent::PaymentIntentFailed { payment_intent_handle } => {
                match self.payments.fail_pending_by_intent_handle(&payment_intent_handle).await {
                    Ok(Some(_)) => Ok(ReconcileOutcome::Logged),
                    Ok(None) => Ok(ReconcileOutcome::Ignored),
                    Err(e) => Err(HandleWebhookError::RepositoryError(e.to_string())),
                }
            }
            WebhookEvent::Other(kind) => {
                tracing::info!(event_kind = %kind, "ignoring unrecognized webhook event type");
                Ok(ReconcileOutcome::Ignored)
            }
        }
    }
}

impl<R: PaymentRepository, P: PaymentsProvider, L: CreditLedger> WebhookReconciler<R, P, L> {
    async fn credit_once(
        &self,
        transition: Result<
            Option<crate::modules::payment::application::domain::entities::Payment>,
            crate::modules::payment::application::ports::outgoing::payment_repository::PaymentRepositoryError,
        >,
    ) -> Result<ReconcileOutcome, HandleWebhookError> {
        let payment = match transition {
            Ok(Some(payment)) => payment,
            Ok(None) => return Ok(ReconcileOutcome::AlreadyProcessed),
            Err(e) => return Err(HandleWebhookError::RepositoryError(e.to_string())),
        };

        self.ledger
            .credit(payment.owner_id, payment.credits_granted)
            .await
            .map_err(|e| HandleWebhookError::LedgerError(e.to_string()))?;

        Ok(ReconcileOutcome::Credited { owner_id: payment.owner_id, credits: payment.credits_granted })
    }
}

fn map_provider_error(e: PaymentsProviderError) -> HandleWebhookError {
    match e {
        PaymentsProviderError::BadSignature => HandleWebhookError::BadSignature,
        PaymentsProviderError::MissingSecret => HandleWebhookError::MissingSecret,
        PaymentsProviderError::Transport(msg) => HandleWebhookError::RepositoryError(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::credit::application::ports::outgoing::credit_ledger::CreditLedgerError;
    use crate::modules::payment::application::domain::catalog::CreditPackage;
    use crate::modules::payment::application::domain::entities::{Payment, PaymentStatus};
    use crate::modules::payment::application::ports::outgoing::payment_repository::{
        NewPayment, PaymentRepositoryError,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct FakePayments {
        row: Mutex<Option<Payment>>,
    }

    #[async_trait]
    impl PaymentRepository for FakePayments {
        async fn insert_pending(&self, _n: NewPayment) -> Result<Payment, PaymentRepositoryError> {
            unimplemented!()
        }
        async fn find_by_checkout_handle(&self, _h: &str) -> Result<Option<Payment>, PaymentRepositoryError> {
            unimplemented!()
        }
        async fn find_by_intent_handle(&self, _h: &str) -> Result<Option<Payment>, PaymentRepositoryError> {
            unimplemented!()
        }
        async fn complete_by_checkout_handle(&self, _h: &str) -> Result<Option<Payment>, PaymentRepositoryError> {
            unimplemented!()
        }
        async fn complete_by_intent_handle(&self, handle: &str) -> Result<Option<Payment>, PaymentRepositoryError> {
            let mut guard = self.row.lock().unwrap();
            match guard.as_mut() {
                Some(p) if p.payment_intent_handle.as_deref() == Some(handle) && p.status == PaymentStatus::Pending => {
                    p.status = PaymentStatus::Completed;
                    p.completed_at = Some(Utc::now());
                    Ok(Some(p.clone()))
                }
                _ => Ok(None),
            }
        }
        async fn fail_pending_by_intent_handle(&self, _h: &str) -> Result<Option<Payment>, PaymentRepositoryError> {
            unimplemented!()
        }
    }

    struct FakeProvider;

    #[async_trait]
    impl PaymentsProvider for FakeProvider {
        fn list_packages(&self) -> Vec<CreditPackage> {
            vec![]
        }
        async fn create_checkout_session(
            &self,
            _c: Option<&str>,
            _p: &CreditPackage,
            _s: &str,
            _x: &str,
            _o: Uuid,
        ) -> Result<crate::modules::payment::application::ports::outgoing::payments_provider::CheckoutSession, PaymentsProviderError>
        {
            unimplemented!()
        }
        async fn create_payment_intent(
            &self,
            _c: Option<&str>,
            _p: &CreditPackage,
            _o: Uuid,
        ) -> Result<crate::modules::payment::application::ports::outgoing::payments_provider::PaymentIntent, PaymentsProviderError>
        {
            unimplemented!()
        }
        fn verify_and_parse_webhook(&self, _payload: &[u8], signature_header: &str) -> Result<WebhookEvent, PaymentsProviderError> {
            if signature_header == "bad" {
                return Err(PaymentsProviderError::BadSignature);
            }
            Ok(WebhookEvent::PaymentIntentSucceeded { payment_intent_handle: "pi_1".to_string() })
        }
    }

    struct FakeLedger {
        balance: Mutex<i32>,
    }

    #[async_trait]
    impl CreditLedger for FakeLedger {
        async fn balance(&self, _owner_id: Uuid) -> Result<i32, CreditLedgerError> {
            Ok(*self.balance.lock().unwrap())
        }
        async fn has_at_least(&self, _owner_id: Uuid, n: i32) -> Result<bool, CreditLedgerError> {
            Ok(*self.balance.lock().unwrap() >= n)
        }
        async fn debit(&self, _owner_id: Uuid, n: i32) -> Result<bool, CreditLedgerError> {
            let mut b = self.balance.lock().unwrap();
            if *b < n {
                return Ok(false);
            }
            *b -= n;
            Ok(true)
        }
        async fn credit(&self, _owner_id: Uuid, n: i32) -> Result<(), CreditLedgerError> {
            *self.balance.lock().unwrap() += n;
            Ok(())
        }
    }

    fn payment_row() -> Payment {
        Payment {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            checkout_session_handle: None,
            payment_intent_handle: Some("pi_1".to_string()),
            amount_minor: 1999,
            currency: "usd".to_string(),
            credits_granted: 50,
            package_id: "popular".to_string(),
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn a_second_delivery_of_the_same_event_is_reported_already_processed() {
        let reconciler = WebhookReconciler::new(
            Arc::new(FakePayments { row: Mutex::new(Some(payment_row())) }),
            Arc::new(FakeProvider),
            Arc::new(FakeLedger { balance: Mutex::new(0) }),
        );

        let first = reconciler.execute("stripe", b"{}", "ok").await.unwrap();
        assert_eq!(first, ReconcileOutcome::Credited { owner_id: reconciler.payments.row.lock().unwrap().as_ref().unwrap().owner_id, credits: 50 });

        let second = reconciler.execute("stripe", b"{}", "ok").await.unwrap();
        assert_eq!(second, ReconcileOutcome::AlreadyProcessed);
    }

    #[tokio::test]
    async fn rejects_an_unknown_provider() {
        let reconciler = WebhookReconciler::new(
            Arc::new(FakePayments { row: Mutex::new(None) }),
            Arc::new(FakeProvider),
            Arc::new(FakeLedger { balance: Mutex::new(0) }),
        );
        let result = reconciler.execute("adyen", b"{}", "ok").await;
        assert!(matches!(result, Err(HandleWebhookError::UnknownProvider)));
    }

    #[tokio::test]
    async fn a_bad_signature_is_rejected_before_any_repository_access() {
        let reconciler = WebhookReconciler::new(
            Arc::new(FakePayments { row: Mutex::new(None) }),
            Arc::new(FakeProvider),
            Arc::new(FakeLedger { balance: Mutex::new(0) }),
        );
        let result = reconciler.execute("stripe", b"{}", "bad").await;
        assert!(matches!(result, Err(HandleWebhookError::BadSignature)));
    }
}
