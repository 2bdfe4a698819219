use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error)]
pub enum JobBrokerError {
    #[error("broker error: {0}")]
    Transport(String),
}

/// The broker is assumed external (spec §1): at-least-once delivery with
/// task chaining. This port models only the thin wake-up channel the worker
/// blocks on; the row in `ai_jobs` remains the system of record, claimed via
/// `PipelineRepository::claim_pending_job`. A dropped or duplicate wake-up
/// is harmless — the worker simply polls the table on its own cadence too.
#[async_trait]
pub trait JobBroker: Send + Sync {
    async fn enqueue(&self, job_id: Uuid) -> Result<(), JobBrokerError>;

    /// Blocks up to `timeout` waiting for a wake-up; returns `None` on
    /// timeout so the caller can fall back to polling.
    async fn dequeue(&self, timeout: Duration) -> Result<Option<Uuid>, JobBrokerError>;
}
