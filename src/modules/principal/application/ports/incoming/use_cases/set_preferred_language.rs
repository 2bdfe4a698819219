use async_trait::async_trait;
use std::fmt;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

/// Spec §6 `/me/preferred-language`: "Accepts `pt` or `en`; 400 otherwise."
/// `es` is a valid capture-language tag elsewhere (spec §4.4), but the
/// endpoint's own contract is narrower — we enforce exactly what §6 states.
pub const ALLOWED_LANGUAGES: [&str; 2] = ["pt", "en"];

#[derive(Debug, Clone)]
pub enum SetPreferredLanguageError {
    UnsupportedLanguage(String),
    RepositoryError(String),
}

impl fmt::Display for SetPreferredLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetPreferredLanguageError::UnsupportedLanguage(lang) => {
                write!(f, "unsupported language: {lang}")
            }
            SetPreferredLanguageError::RepositoryError(msg) => {
                write!(f, "repository error: {msg}")
            }
        }
    }
}

#[async_trait]
pub trait SetPreferredLanguageUseCase: Send + Sync {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        language: String,
    ) -> Result<(), SetPreferredLanguageError>;
}
