use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::payment::application::domain::entities::Payment;

#[derive(Debug, Error)]
pub enum PaymentRepositoryError {
    #[error("database error: {0}")]
    Database(String),
}

pub struct NewPayment {
    pub owner_id: Uuid,
    pub checkout_session_handle: Option<String>,
    pub payment_intent_handle: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub credits_granted: i32,
    pub package_id: String,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert_pending(&self, new_payment: NewPayment) -> Result<Payment, PaymentRepositoryError>;

    async fn find_by_checkout_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;

    async fn find_by_intent_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;

    /// Transitions a `pending` row matched by checkout handle to `completed`
    /// and stamps `completed_at`. Returns `Ok(None)` if no row matches or the
    /// row is already `completed` (spec §4.7 idempotent-replay rule) — the
    /// caller must not grant credits again in that case.
    async fn complete_by_checkout_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;

    async fn complete_by_intent_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;

    /// No-op unless the row matched by intent handle is currently `pending`.
    async fn fail_pending_by_intent_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;
}
