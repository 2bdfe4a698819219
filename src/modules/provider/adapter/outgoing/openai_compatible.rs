//! A single HTTP client shape for the two backends the reference deployment
//! actually uses (OpenAI, Groq): both expose an OpenAI-compatible REST
//! surface (`/chat/completions`, `/embeddings`, `/audio/transcriptions`), so
//! one struct parameterized by base URL and model names serves all four
//! capability traits, the way `original_source`'s `openai_provider.py` and
//! `groq_provider.py` share almost identical request shapes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

use crate::modules::provider::application::domain::entities::{BlockText, ImageReference, Language};
use crate::modules::provider::application::domain::prompts;
use crate::modules::provider::application::ports::outgoing::llm_provider::{
    ChatProvider, EmbeddingProvider, ProviderFailure, SpeechProvider, VisionProvider,
};

const SUMMARY_MAX_CHARS: usize = 8_000;
const TITLE_MAX_CHARS: usize = 2_000;

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    provider_name: &'static str,
    chat_model: String,
    embedding_model: String,
    embedding_dimension: usize,
    transcription_model: String,
    vision_model: String,
}

impl OpenAiCompatibleClient {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider_name: &'static str,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        chat_model: impl Into<String>,
        embedding_model: impl Into<String>,
        embedding_dimension: usize,
        transcription_model: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            provider_name,
            chat_model: chat_model.into(),
            embedding_model: embedding_model.into(),
            embedding_dimension,
            transcription_model: transcription_model.into(),
            vision_model: vision_model.into(),
        }
    }

    async fn chat_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, ProviderFailure> {
        self.chat_completion_with_model(&self.chat_model, system_prompt, user_prompt, None, temperature, max_tokens)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn chat_completion_with_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        image: Option<&ImageReference>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, ProviderFailure> {
        let user_content = match image {
            None => json!(user_prompt),
            Some(ImageReference::Url(url)) => json!([
                { "type": "text", "text": user_prompt },
                { "type": "image_url", "image_url": { "url": url } },
            ]),
            Some(ImageReference::Inline { base64_data, content_type }) => json!([
                { "type": "text", "text": user_prompt },
                { "type": "image_url", "image_url": { "url": format!("data:{content_type};base64,{base64_data}") } },
            ]),
        };

        let body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_content },
            ],
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderFailure::new(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::new(format!("{status}: {text}")));
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }
        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatMessage {
            content: String,
        }

        let parsed: ChatResponse =
            response.json().await.map_err(|e| ProviderFailure::new(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderFailure::new("empty choices array"))
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleClient {
    fn name(&self) -> &'static str {
        self.provider_name
    }

    async fn summarize(&self, blocks: &[BlockText], language: Language) -> Result<String, ProviderFailure> {
        let combined = blocks
            .iter()
            .map(|b| b.text_content.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        if combined.is_empty() {
            return Ok("No text content available for summary.".to_string());
        }

        let combined = if combined.chars().count() > SUMMARY_MAX_CHARS {
            let mut truncated: String = combined.chars().take(SUMMARY_MAX_CHARS).collect();
            truncated.push_str("... [truncated]");
            truncated
        } else {
            combined
        };

        let system_prompt = prompts::summarize_system_prompt(language);
        let user_prompt = prompts::summarize_user_prompt(language, &combined);
        self.chat_completion(system_prompt, &user_prompt, 0.3, 800).await
    }

    async fn title(&self, text: &str, language: Language) -> Result<String, ProviderFailure> {
        let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
        let system_prompt = prompts::title_system_prompt(language);
        let user_prompt = prompts::title_user_prompt(language, &truncated);
        let raw = self.chat_completion(system_prompt, &user_prompt, 0.5, 30).await?;
        Ok(prompts::truncate_title(raw))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiCompatibleClient {
    fn name(&self) -> &'static str {
        self.provider_name
    }

    fn dimension(&self) -> usize {
        self.embedding_dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderFailure> {
        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            input: &'a str,
        }
        #[derive(Deserialize)]
        struct EmbedResponse {
            data: Vec<EmbedData>,
        }
        #[derive(Deserialize)]
        struct EmbedData {
            embedding: Vec<f32>,
        }

        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest { model: &self.embedding_model, input: text })
            .send()
            .await
            .map_err(|e| ProviderFailure::new(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::new(format!("{status}: {text}")));
        }

        let parsed: EmbedResponse =
            response.json().await.map_err(|e| ProviderFailure::new(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ProviderFailure::new("empty embedding data array"))
    }
}

#[async_trait]
impl SpeechProvider for OpenAiCompatibleClient {
    fn name(&self) -> &'static str {
        self.provider_name
    }

    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        hint: Option<&str>,
    ) -> Result<String, ProviderFailure> {
        let bytes = tokio::fs::read(audio_path).await.map_err(|e| ProviderFailure::new(e.to_string()))?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| ProviderFailure::new(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .part("file", part);

        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }
        if let Some(hint) = hint {
            form = form.text("prompt", hint.to_string());
        }

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderFailure::new(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::new(format!("{status}: {text}")));
        }

        #[derive(Deserialize)]
        struct TranscriptionResponse {
            text: String,
        }

        let parsed: TranscriptionResponse =
            response.json().await.map_err(|e| ProviderFailure::new(e.to_string()))?;

        Ok(parsed.text)
    }
}

#[async_trait]
impl VisionProvider for OpenAiCompatibleClient {
    fn name(&self) -> &'static str {
        self.provider_name
    }

    async fn describe_image(
        &self,
        reference: &ImageReference,
        language: Language,
    ) -> Result<String, ProviderFailure> {
        let prompt_text = prompts::image_description_prompt(language);
        self.chat_completion_with_model(
            &self.vision_model,
            "You are an image description assistant.",
            prompt_text,
            Some(reference),
            0.2,
            500,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(
            "openai",
            "https://api.openai.test/v1",
            "sk-test",
            "gpt-3.5-turbo",
            "text-embedding-3-small",
            1536,
            "whisper-1",
            "gpt-4o-mini",
        )
    }

    #[tokio::test]
    async fn summarize_short_circuits_without_a_network_call_when_no_text_blocks() {
        let summary = client().summarize(&[], Language::En).await.unwrap();
        assert_eq!(summary, "No text content available for summary.");
    }

    #[test]
    fn embedding_dimension_reflects_construction() {
        assert_eq!(client().dimension(), 1536);
    }
}
