use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::session::application::domain::entities::{Block, NewBlock};
use crate::modules::session::application::ports::incoming::use_cases::append_block::{
    AppendBlockError, AppendBlockInput, AppendBlockUseCase,
};
use crate::modules::session::application::ports::outgoing::session_repository::{
    SessionRepository, SessionRepositoryError,
};
use uuid::Uuid;

pub struct AppendBlockService<R: SessionRepository, P: PrincipalRepository> {
    repo: Arc<R>,
    principals: Arc<P>,
}

impl<R: SessionRepository, P: PrincipalRepository> AppendBlockService<R, P> {
    pub fn new(repo: Arc<R>, principals: Arc<P>) -> Self {
        Self { repo, principals }
    }
}

#[async_trait]
impl<R: SessionRepository, P: PrincipalRepository> AppendBlockUseCase for AppendBlockService<R, P> {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        session_id: Uuid,
        input: AppendBlockInput,
    ) -> Result<Block, AppendBlockError> {
        if !input.block_type.is_client_appendable() {
            return Err(AppendBlockError::ClientCannotAppendType(input.block_type));
        }

        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| AppendBlockError::PrincipalError(e.to_string()))?;

        let block = NewBlock {
            block_type: input.block_type,
            text_content: input.text_content,
            media_object_key: input.media_object_key,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
        };

        self.repo
            .append_block(session_id, principal.id, block)
            .await
            .map_err(|e| match e {
                SessionRepositoryError::NotFoundOrAccessDenied => AppendBlockError::NotFoundOrAccessDenied,
                SessionRepositoryError::StateConflict => AppendBlockError::StateConflict,
                SessionRepositoryError::Database(msg) => AppendBlockError::RepositoryError(msg),
            })
    }
}
