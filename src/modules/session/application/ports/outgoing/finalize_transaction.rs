use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Debit succeeded; session moved to `pending_processing` and an AIJob was created.
    WithAi { job_id: Uuid },
    /// Debit failed (insufficient balance); session moved to `no_credits`, no job created.
    NoCredits,
}

#[derive(Debug, Error)]
pub enum FinalizeTransactionError {
    #[error("session not found or not owned by caller")]
    NotFoundOrAccessDenied,
    #[error("session is not in the `open` state")]
    StateConflict,
    #[error("session has no blocks to finalize")]
    NoBlocks,
    #[error("database error: {0}")]
    Database(String),
}

/// Wraps the single-transaction group required by the concurrency model:
/// the session-status write, AIJob creation, and credit debit commit or roll
/// back together. `has_at_least` is advisory only — the conditional debit
/// inside this transaction is the actual race arbiter.
#[async_trait]
pub trait FinalizeTransaction: Send + Sync {
    async fn finalize_with_credit(
        &self,
        session_id: Uuid,
        owner: Uuid,
        credits_required: i32,
    ) -> Result<FinalizeOutcome, FinalizeTransactionError>;
}
