use async_trait::async_trait;
use std::fmt;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

#[derive(Debug, Clone)]
pub struct MeOutput {
    pub credits: i32,
    pub preferred_language: String,
}

#[derive(Debug, Clone)]
pub enum GetMeError {
    RepositoryError(String),
}

impl fmt::Display for GetMeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetMeError::RepositoryError(msg) => write!(f, "repository error: {msg}"),
        }
    }
}

#[async_trait]
pub trait GetMeUseCase: Send + Sync {
    async fn execute(&self, identity: VerifiedIdentity) -> Result<MeOutput, GetMeError>;
}
