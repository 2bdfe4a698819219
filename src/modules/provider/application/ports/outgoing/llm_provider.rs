use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::modules::provider::application::domain::entities::{BlockText, ImageReference, Language};

/// All provider calls are timed by callers; on failure the router reports
/// this typed error, preserving the original message but not the stack
/// (spec §4.4).
#[derive(Debug, Clone, Error)]
#[error("provider_failure: {0}")]
pub struct ProviderFailure(pub String);

impl ProviderFailure {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// `summarize`/`title`: controlled by a single configured chat provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn summarize(&self, blocks: &[BlockText], language: Language) -> Result<String, ProviderFailure>;

    async fn title(&self, text: &str, language: Language) -> Result<String, ProviderFailure>;
}

/// `embed`: controlled by a single configured embedding provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fixed output dimension, used by the vector index to reject wrong-d
    /// inputs before they reach the store.
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderFailure>;
}

/// `transcribe`: primary provider, the router applies single-hop fallback
/// to a secondary `SpeechProvider` on failure.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        hint: Option<&str>,
    ) -> Result<String, ProviderFailure>;
}

/// `describe_image`: accepts either a URL or base64-inlined bytes; the
/// router applies single-hop fallback to a secondary `VisionProvider`.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn describe_image(
        &self,
        reference: &ImageReference,
        language: Language,
    ) -> Result<String, ProviderFailure>;
}
