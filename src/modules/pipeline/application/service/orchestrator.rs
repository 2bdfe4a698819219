use std::sync::Arc;
use std::time::Duration;

use base64::Engine;

use crate::modules::media::application::domain::entities::MediaKind;
use crate::modules::media::application::ports::outgoing::media_repository::MediaRepository;
use crate::modules::media::application::ports::outgoing::object_store_gateway::ObjectStoreGateway;
use crate::modules::pipeline::application::domain::context::{PipelineContext, PipelineRunReport};
use crate::modules::pipeline::application::domain::wav::{is_already_containerized, wrap_pcm_as_wav};
use crate::modules::pipeline::application::ports::outgoing::pipeline_repository::{
    ClaimedJob, PipelineRepository,
};
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::provider::application::domain::entities::{BlockText, ImageReference, Language};
use crate::modules::provider::application::domain::prompts::summary_failure_marker;
use crate::modules::provider::application::service::provider_router::ProviderRouter;
use crate::modules::session::application::domain::entities::BlockType;
use crate::modules::vector::application::domain::chunking;
use crate::modules::vector::application::ports::outgoing::vector_index::VectorIndex;
use crate::shared::notify::{PushEvent, PushNotifier};

const EMBEDDING_BATCH_SIZE: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("repository error: {0}")]
    Repository(String),
}

/// Drives the three-stage chain (transcribe -> describe-images ->
/// summarize/embed/title) for one claimed job (spec §4.6 C7). Holds trait
/// objects rather than generic parameters, the same composition-root shape
/// `ProviderRouter` uses, since this is wired once in `AppState`/the worker
/// binary and never mocked at the generic-parameter level.
pub struct PipelineOrchestrator {
    repo: Arc<dyn PipelineRepository>,
    media: Arc<dyn MediaRepository>,
    gateway: Arc<dyn ObjectStoreGateway>,
    vector: Arc<dyn VectorIndex>,
    principals: Arc<dyn PrincipalRepository>,
    providers: Arc<ProviderRouter>,
    notifier: Arc<dyn PushNotifier>,
    enable_embeddings: bool,
    presign_get_ttl: Duration,
}

impl PipelineOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: Arc<dyn PipelineRepository>,
        media: Arc<dyn MediaRepository>,
        gateway: Arc<dyn ObjectStoreGateway>,
        vector: Arc<dyn VectorIndex>,
        principals: Arc<dyn PrincipalRepository>,
        providers: Arc<ProviderRouter>,
        notifier: Arc<dyn PushNotifier>,
        enable_embeddings: bool,
        presign_get_ttl: Duration,
    ) -> Self {
        Self {
            repo,
            media,
            gateway,
            vector,
            principals,
            providers,
            notifier,
            enable_embeddings,
            presign_get_ttl,
        }
    }

    /// Runs the full chain for one claimed job. A fatal error (DB commit
    /// failure, provider misconfiguration at entry) marks the job and
    /// session `failed`; per-file/per-chunk failures within a stage are
    /// logged, counted, and do not abort the run.
    pub async fn run(&self, claimed: ClaimedJob) -> Result<PipelineRunReport, OrchestratorError> {
        let ctx = PipelineContext {
            session_id: claimed.session_id,
            job_id: claimed.job_id,
            owner_id: claimed.owner_id,
        };

        if let Err(e) = self.repo.set_session_status(ctx.session_id, "processing").await {
            return self.fail(ctx, format!("could not mark session processing: {e}")).await;
        }

        let session = match self.repo.get_session(ctx.session_id).await {
            Ok(Some(s)) => s,
            Ok(None) => return self.fail(ctx, "session vanished mid-run".to_string()).await,
            Err(e) => return self.fail(ctx, e.to_string()).await,
        };
        let language = Language::from_tag(session.capture_language.as_deref());

        let mut report = PipelineRunReport::default();

        if let Err(e) = self.stage_a_transcribe(&ctx, language, &mut report).await {
            return self.fail(ctx, e).await;
        }
        if let Err(e) = self.stage_b_describe_images(&ctx, language, &mut report).await {
            return self.fail(ctx, e).await;
        }
        if let Err(e) = self.stage_c_summarize_embed_title(&ctx, language, &mut report).await {
            return self.fail(ctx, e).await;
        }

        if let Err(e) = self.repo.complete_job(ctx.job_id, ctx.session_id).await {
            return self.fail(ctx, e.to_string()).await;
        }

        let principal = self.principals.find_by_id(ctx.owner_id).await.ok();
        self.notifier
            .notify(
                principal.as_ref().and_then(|p| p.push_token.as_deref()),
                PushEvent::SessionReady,
                ctx.session_id,
            )
            .await;

        Ok(report)
    }

    async fn fail(&self, ctx: PipelineContext, reason: String) -> Result<PipelineRunReport, OrchestratorError> {
        tracing::error!(session_id = %ctx.session_id, job_id = %ctx.job_id, "pipeline job failed: {reason}");
        let _ = self.repo.set_session_status(ctx.session_id, "failed").await;
        let _ = self.repo.fail_job(ctx.job_id, ctx.session_id).await;
        Err(OrchestratorError::Repository(reason))
    }

    async fn stage_a_transcribe(
        &self,
        ctx: &PipelineContext,
        language: Language,
        report: &mut PipelineRunReport,
    ) -> Result<(), String> {
        let audio_rows = self
            .media
            .list_committed(ctx.session_id, Some(MediaKind::Audio))
            .await
            .map_err(|e| e.to_string())?;

        for row in audio_rows {
            let scratch = match tempfile::NamedTempFile::new() {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!(object_key = %row.object_key, "could not allocate scratch file: {e}");
                    report.transcription.record(false);
                    continue;
                }
            };

            let outcome = self.transcribe_one(&row.object_key, &row.content_type, scratch.path(), language).await;
            match outcome {
                Ok(text) => {
                    report.transcription.record(true);
                    if let Err(e) = self
                        .repo
                        .append_pipeline_block(
                            ctx.session_id,
                            BlockType::TranscriptionBackend,
                            Some(&text),
                            Some(&row.object_key),
                        )
                        .await
                    {
                        return Err(e.to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(object_key = %row.object_key, "transcription failed: {e}");
                    report.transcription.record(false);
                }
            }
            // scratch dropped here; NamedTempFile removes the backing file on every exit path.
        }

        Ok(())
    }

    async fn transcribe_one(
        &self,
        object_key: &str,
        content_type: &str,
        scratch_path: &std::path::Path,
        language: Language,
    ) -> Result<String, String> {
        self.gateway
            .download_to(object_key, scratch_path)
            .await
            .map_err(|e| e.to_string())?;

        let wav_path = if is_already_containerized(content_type, object_key) {
            scratch_path.to_path_buf()
        } else {
            let raw = tokio::fs::read(scratch_path).await.map_err(|e| e.to_string())?;
            let wav = wrap_pcm_as_wav(&raw);
            let wav_file = tempfile::NamedTempFile::new().map_err(|e| e.to_string())?;
            tokio::fs::write(wav_file.path(), &wav).await.map_err(|e| e.to_string())?;
            let (_, path) = wav_file.keep().map_err(|e| e.to_string())?;
            path
        };

        let lang_tag = match language {
            Language::En => "en",
            Language::Es => "es",
            Language::Pt => "pt",
        };

        let result = self.providers.transcribe(&wav_path, Some(lang_tag), None).await;

        if wav_path != scratch_path {
            let _ = tokio::fs::remove_file(&wav_path).await;
        }

        result.map_err(|e| e.to_string())
    }

    async fn stage_b_describe_images(
        &self,
        ctx: &PipelineContext,
        language: Language,
        report: &mut PipelineRunReport,
    ) -> Result<(), String> {
        let image_rows = self
            .media
            .list_committed(ctx.session_id, Some(MediaKind::Image))
            .await
            .map_err(|e| e.to_string())?;

        for row in image_rows {
            let description = self.describe_one(&row.object_key, &row.content_type, language).await;
            match description {
                Ok(text) => {
                    report.image_description.record(true);
                    if let Err(e) = self
                        .repo
                        .append_pipeline_block(
                            ctx.session_id,
                            BlockType::ImageDescription,
                            Some(&text),
                            Some(&row.object_key),
                        )
                        .await
                    {
                        return Err(e.to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(object_key = %row.object_key, "image description failed: {e}");
                    report.image_description.record(false);
                }
            }
        }

        Ok(())
    }

    async fn describe_one(
        &self,
        object_key: &str,
        content_type: &str,
        language: Language,
    ) -> Result<String, String> {
        let url = self
            .gateway
            .presign_get(object_key, self.presign_get_ttl)
            .await
            .map_err(|e| e.to_string())?;

        let url_attempt = self
            .providers
            .describe_image(&ImageReference::Url(url), language)
            .await;

        if let Ok(text) = url_attempt {
            return Ok(text);
        }

        tracing::warn!(object_key = %object_key, "url-based image description failed, retrying with base64 inline");

        let scratch = tempfile::NamedTempFile::new().map_err(|e| e.to_string())?;
        self.gateway
            .download_to(object_key, scratch.path())
            .await
            .map_err(|e| e.to_string())?;
        let bytes = tokio::fs::read(scratch.path()).await.map_err(|e| e.to_string())?;
        let base64_data = base64::engine::general_purpose::STANDARD.encode(bytes);

        self.providers
            .describe_image(
                &ImageReference::Inline { base64_data, content_type: content_type.to_string() },
                language,
            )
            .await
            .map_err(|e| e.to_string())
    }

    async fn stage_c_summarize_embed_title(
        &self,
        ctx: &PipelineContext,
        language: Language,
        report: &mut PipelineRunReport,
    ) -> Result<(), String> {
        let blocks = self.repo.list_blocks(ctx.session_id).await.map_err(|e| e.to_string())?;
        let text_blocks: Vec<BlockText> = blocks
            .iter()
            .filter(|b| b.block_type.is_text_bearing())
            .filter_map(|b| b.text_content.clone())
            .map(|text_content| BlockText { text_content })
            .collect();

        if self.enable_embeddings {
            let combined = chunking::concatenate(
                &text_blocks.iter().map(|b| b.text_content.clone()).collect::<Vec<_>>(),
            );
            let chunks = chunking::chunk(&combined);

            for batch in chunks.chunks(EMBEDDING_BATCH_SIZE) {
                for chunk_text in batch {
                    match self.providers.embed(chunk_text).await {
                        Ok(embedding) => {
                            report.embedding.record(true);
                            if let Err(e) = self
                                .vector
                                .upsert(
                                    ctx.session_id,
                                    None,
                                    self.providers.embedding_provider_name(),
                                    chunk_text,
                                    &embedding,
                                )
                                .await
                            {
                                tracing::warn!("embedding upsert failed: {e}");
                                report.embedding.record(false);
                            }
                        }
                        Err(e) => {
                            tracing::warn!("embedding generation failed: {e}");
                            report.embedding.record(false);
                        }
                    }
                }
                // batch's buffers drop here; yield so the runtime can reclaim
                // the scratch allocations before the next batch starts.
                tokio::task::yield_now().await;
            }
        }

        let combined_text = text_blocks
            .iter()
            .map(|b| b.text_content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let summary = match self.providers.summarize(&text_blocks, language).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("summary generation failed: {e}");
                summary_failure_marker(language).to_string()
            }
        };

        let title = match self.providers.title(&combined_text, language).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!("title generation failed: {e}");
                combined_text.chars().take(50).collect::<String>()
            }
        };

        self.repo
            .set_summary_and_title(ctx.session_id, &summary, &title)
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
