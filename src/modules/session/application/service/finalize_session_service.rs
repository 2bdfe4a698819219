use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::session::application::domain::entities::SessionStatus;
use crate::modules::session::application::ports::incoming::use_cases::finalize_session::{
    FinalizeSessionError, FinalizeSessionOutput, FinalizeSessionUseCase, SESSION_PROCESSING_COST,
};
use crate::modules::session::application::ports::outgoing::finalize_transaction::{
    FinalizeOutcome, FinalizeTransaction, FinalizeTransactionError,
};

pub struct FinalizeSessionService<F: FinalizeTransaction, P: PrincipalRepository> {
    finalizer: Arc<F>,
    principals: Arc<P>,
}

impl<F: FinalizeTransaction, P: PrincipalRepository> FinalizeSessionService<F, P> {
    pub fn new(finalizer: Arc<F>, principals: Arc<P>) -> Self {
        Self { finalizer, principals }
    }
}

#[async_trait]
impl<F: FinalizeTransaction, P: PrincipalRepository> FinalizeSessionUseCase
    for FinalizeSessionService<F, P>
{
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
    ) -> Result<FinalizeSessionOutput, FinalizeSessionError> {
        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| FinalizeSessionError::PrincipalError(e.to_string()))?;

        let outcome = self
            .finalizer
            .finalize_with_credit(session_id, principal.id, SESSION_PROCESSING_COST)
            .await
            .map_err(|e| match e {
                FinalizeTransactionError::NotFoundOrAccessDenied => {
                    FinalizeSessionError::NotFoundOrAccessDenied
                }
                FinalizeTransactionError::StateConflict => FinalizeSessionError::StateConflict,
                FinalizeTransactionError::NoBlocks => FinalizeSessionError::NoBlocks,
                FinalizeTransactionError::Database(msg) => FinalizeSessionError::RepositoryError(msg),
            })?;

        Ok(match outcome {
            FinalizeOutcome::WithAi { job_id } => FinalizeSessionOutput {
                session_id,
                status: SessionStatus::PendingProcessing,
                job_id: Some(job_id),
            },
            FinalizeOutcome::NoCredits => FinalizeSessionOutput {
                session_id,
                status: SessionStatus::NoCredits,
                job_id: None,
            },
        })
    }
}
