use async_trait::async_trait;
use std::fmt;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

#[derive(Debug, Clone)]
pub enum SetPushTokenError {
    RepositoryError(String),
}

impl fmt::Display for SetPushTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetPushTokenError::RepositoryError(msg) => write!(f, "repository error: {msg}"),
        }
    }
}

#[async_trait]
pub trait SetPushTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        token: String,
    ) -> Result<(), SetPushTokenError>;
}
