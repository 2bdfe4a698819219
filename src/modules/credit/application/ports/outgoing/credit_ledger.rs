use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CreditLedgerError {
    #[error("database error: {0}")]
    Database(String),
}

/// The conditional debit (`balance = balance - n WHERE balance >= n`) is the
/// single serialization point for concurrent finalize attempts (spec §4.2,
/// §5 "Shared-resource policy"). No other code path may write `credits`
/// directly — see the `chk_principals_credits_nonnegative` DB constraint.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    async fn balance(&self, owner: Uuid) -> Result<i32, CreditLedgerError>;

    async fn has_at_least(&self, owner: Uuid, n: i32) -> Result<bool, CreditLedgerError>;

    /// Returns whether the conditional update affected a row. `n == 0` is a
    /// no-op that always returns `true`.
    async fn debit(&self, owner: Uuid, n: i32) -> Result<bool, CreditLedgerError>;

    /// Unconditional `balance = balance + n`. `n` must be `> 0`.
    async fn credit(&self, owner: Uuid, n: i32) -> Result<(), CreditLedgerError>;
}
