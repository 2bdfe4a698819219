//! Builds the `ProviderRouter` from `AppConfig`. Shared by the HTTP process
//! and the worker binary so provider selection lives in one place.

use std::sync::Arc;

use crate::modules::provider::adapter::outgoing::openai_compatible::OpenAiCompatibleClient;
use crate::modules::provider::application::ports::outgoing::llm_provider::{
    ChatProvider, EmbeddingProvider, SpeechProvider, VisionProvider,
};
use crate::modules::provider::application::service::provider_router::ProviderRouter;
use crate::shared::config::AppConfig;

fn base_url_for(provider: &str) -> Result<&'static str, String> {
    match provider {
        "openai" => Ok("https://api.openai.com/v1"),
        "groq" => Ok("https://api.groq.com/openai/v1"),
        other => Err(format!("unknown provider `{other}`")),
    }
}

fn client_for(provider_name: &'static str, api_key: &str) -> Result<OpenAiCompatibleClient, String> {
    let base_url = base_url_for(provider_name)?;
    let (chat_model, embedding_model, embedding_dimension, transcription_model, vision_model) =
        match provider_name {
            "openai" => ("gpt-4o-mini", "text-embedding-3-small", 1536, "whisper-1", "gpt-4o-mini"),
            "groq" => ("llama-3.3-70b-versatile", "text-embedding-3-small", 1536, "whisper-large-v3", "llama-3.2-11b-vision-preview"),
            other => return Err(format!("unknown provider `{other}`")),
        };

    Ok(OpenAiCompatibleClient::new(
        provider_name,
        base_url,
        api_key,
        chat_model,
        embedding_model,
        embedding_dimension,
        transcription_model,
        vision_model,
    ))
}

/// Embedding is mandatory (spec §4.4) — a missing/misconfigured embedding
/// backend fails here, at startup, rather than on the first search request.
pub fn build_provider_router(config: &AppConfig) -> Result<ProviderRouter, String> {
    let chat_provider: &'static str = match config.chat_provider.as_str() {
        "openai" => "openai",
        "groq" => "groq",
        other => return Err(format!("unknown chat provider `{other}`")),
    };
    let embedding_provider: &'static str = match config.embedding_provider.as_str() {
        "openai" => "openai",
        "groq" => "groq",
        other => return Err(format!("unknown embedding provider `{other}`")),
    };

    let chat_key = config.chat_api_key.clone().ok_or("CHAT_API_KEY is required")?;
    let embedding_key = config.embedding_api_key.clone().ok_or("EMBEDDING_API_KEY is required")?;

    let chat: Arc<dyn ChatProvider> = Arc::new(client_for(chat_provider, &chat_key)?);
    let embedding: Arc<dyn EmbeddingProvider> = Arc::new(client_for(embedding_provider, &embedding_key)?);

    let speech_primary: Arc<dyn SpeechProvider> = Arc::new(client_for(
        chat_provider,
        config.speech_api_key.as_deref().unwrap_or(&chat_key),
    )?);
    let speech_fallback: Option<Arc<dyn SpeechProvider>> = config
        .speech_fallback_api_key
        .as_ref()
        .map(|key| client_for("groq", key).map(|c| Arc::new(c) as Arc<dyn SpeechProvider>))
        .transpose()?;

    let vision_primary: Arc<dyn VisionProvider> = Arc::new(client_for(
        chat_provider,
        config.vision_api_key.as_deref().unwrap_or(&chat_key),
    )?);
    let vision_fallback: Option<Arc<dyn VisionProvider>> = config
        .vision_fallback_api_key
        .as_ref()
        .map(|key| client_for("groq", key).map(|c| Arc::new(c) as Arc<dyn VisionProvider>))
        .transpose()?;

    Ok(ProviderRouter::new(
        chat,
        embedding,
        speech_primary,
        speech_fallback,
        vision_primary,
        vision_fallback,
    ))
}
