use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::modules::provider::application::domain::entities::{BlockText, ImageReference, Language};
use crate::modules::provider::application::ports::outgoing::llm_provider::{
    ChatProvider, EmbeddingProvider, ProviderFailure, SpeechProvider, VisionProvider,
};

/// Composes the capability-tagged backends into the single facade the
/// orchestrator and search module call through (spec §4.4 C5). Construction
/// is the fail-fast point for "always have an embedding-capable backend" —
/// `embedding` is not optional, so a misconfigured deployment fails at
/// `AppState` wiring time rather than on the first search request.
pub struct ProviderRouter {
    chat: Arc<dyn ChatProvider>,
    embedding: Arc<dyn EmbeddingProvider>,
    speech_primary: Arc<dyn SpeechProvider>,
    speech_fallback: Option<Arc<dyn SpeechProvider>>,
    vision_primary: Arc<dyn VisionProvider>,
    vision_fallback: Option<Arc<dyn VisionProvider>>,
}

impl ProviderRouter {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        embedding: Arc<dyn EmbeddingProvider>,
        speech_primary: Arc<dyn SpeechProvider>,
        speech_fallback: Option<Arc<dyn SpeechProvider>>,
        vision_primary: Arc<dyn VisionProvider>,
        vision_fallback: Option<Arc<dyn VisionProvider>>,
    ) -> Self {
        Self { chat, embedding, speech_primary, speech_fallback, vision_primary, vision_fallback }
    }

    pub fn embedding_dimension(&self) -> usize {
        self.embedding.dimension()
    }

    pub fn embedding_provider_name(&self) -> &str {
        self.embedding.name()
    }

    pub async fn summarize(&self, blocks: &[BlockText], language: Language) -> Result<String, ProviderFailure> {
        self.timed(self.chat.name(), "summarize", self.chat.summarize(blocks, language)).await
    }

    pub async fn title(&self, text: &str, language: Language) -> Result<String, ProviderFailure> {
        self.timed(self.chat.name(), "title", self.chat.title(text, language)).await
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderFailure> {
        self.timed(self.embedding.name(), "embed", self.embedding.embed(text)).await
    }

    pub async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        hint: Option<&str>,
    ) -> Result<String, ProviderFailure> {
        let primary = self
            .timed(
                self.speech_primary.name(),
                "transcribe",
                self.speech_primary.transcribe(audio_path, language, hint),
            )
            .await;

        match (primary, &self.speech_fallback) {
            (Ok(text), _) => Ok(text),
            (Err(e), Some(fallback)) => {
                tracing::warn!(
                    "speech provider {} failed ({e}), falling back to {}",
                    self.speech_primary.name(),
                    fallback.name()
                );
                self.timed(fallback.name(), "transcribe", fallback.transcribe(audio_path, language, hint))
                    .await
            }
            (Err(e), None) => Err(e),
        }
    }

    pub async fn describe_image(
        &self,
        reference: &ImageReference,
        language: Language,
    ) -> Result<String, ProviderFailure> {
        let primary = self
            .timed(
                self.vision_primary.name(),
                "describe_image",
                self.vision_primary.describe_image(reference, language),
            )
            .await;

        match (primary, &self.vision_fallback) {
            (Ok(text), _) => Ok(text),
            (Err(e), Some(fallback)) => {
                tracing::warn!(
                    "vision provider {} failed ({e}), falling back to {}",
                    self.vision_primary.name(),
                    fallback.name()
                );
                self.timed(
                    fallback.name(),
                    "describe_image",
                    fallback.describe_image(reference, language),
                )
                .await
            }
            (Err(e), None) => Err(e),
        }
    }

    async fn timed<T>(
        &self,
        provider: &str,
        operation: &str,
        fut: impl std::future::Future<Output = Result<T, ProviderFailure>>,
    ) -> Result<T, ProviderFailure> {
        let start = Instant::now();
        let result = fut.await;
        let elapsed = start.elapsed();
        match &result {
            Ok(_) => tracing::debug!(provider, operation, elapsed_ms = elapsed.as_millis() as u64, "provider call ok"),
            Err(e) => tracing::warn!(provider, operation, elapsed_ms = elapsed.as_millis() as u64, "provider call failed: {e}"),
        }
        result
    }
}
