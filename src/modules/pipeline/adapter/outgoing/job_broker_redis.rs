use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::modules::pipeline::application::ports::outgoing::job_broker::{JobBroker, JobBrokerError};

const QUEUE_KEY: &str = "session_pipeline:ai_jobs";

/// Thin wake-up channel over the ai_jobs row-claiming protocol (see
/// `PipelineRepositoryPostgres::claim_pending_job`): a `BRPOP` wakes a worker,
/// which then re-derives the actual job to run from the database rather than
/// trusting the popped id blindly, so a dropped or duplicate push is
/// harmless.
pub struct RedisJobBroker {
    client: Arc<Client>,
}

impl RedisJobBroker {
    pub fn new(redis_url: &str) -> Result<Self, JobBrokerError> {
        let client = Client::open(redis_url).map_err(|e| JobBrokerError::Transport(e.to_string()))?;
        Ok(Self { client: Arc::new(client) })
    }
}

#[async_trait]
impl JobBroker for RedisJobBroker {
    async fn enqueue(&self, job_id: Uuid) -> Result<(), JobBrokerError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| JobBrokerError::Transport(e.to_string()))?;

        let _: () = conn
            .lpush(QUEUE_KEY, job_id.to_string())
            .await
            .map_err(|e| JobBrokerError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn dequeue(&self, timeout: Duration) -> Result<Option<Uuid>, JobBrokerError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| JobBrokerError::Transport(e.to_string()))?;

        let popped: Option<(String, String)> = conn
            .brpop(QUEUE_KEY, timeout.as_secs_f64())
            .await
            .map_err(|e| JobBrokerError::Transport(e.to_string()))?;

        Ok(popped.and_then(|(_, raw_id)| Uuid::parse_str(&raw_id).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_rejects_an_invalid_url() {
        assert!(RedisJobBroker::new("not-a-url").is_err());
    }
}
