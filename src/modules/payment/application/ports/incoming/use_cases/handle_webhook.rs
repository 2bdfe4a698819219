use async_trait::async_trait;

#[derive(Debug, PartialEq)]
pub enum ReconcileOutcome {
    Credited { owner_id: uuid::Uuid, credits: i32 },
    AlreadyProcessed,
    Ignored,
    Logged,
}

#[derive(Debug)]
pub enum HandleWebhookError {
    UnknownProvider,
    BadSignature,
    MissingSecret,
    RepositoryError(String),
    LedgerError(String),
}

#[async_trait]
pub trait HandleWebhookUseCase: Send + Sync {
    async fn execute(
        &self,
        provider: &str,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<ReconcileOutcome, HandleWebhookError>;
}
