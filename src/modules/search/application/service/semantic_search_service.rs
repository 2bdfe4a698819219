use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepository;
use crate::modules::principal::application::services::resolve_principal::resolve_principal;
use crate::modules::provider::application::service::provider_router::ProviderRouter;
use crate::modules::search::application::domain::entities::SearchHit;
use crate::modules::search::application::ports::incoming::use_cases::semantic_search::{
    SemanticSearchError, SemanticSearchInput, SemanticSearchUseCase,
};
use crate::modules::session::application::ports::outgoing::session_repository::SessionRepository;
use crate::modules::vector::application::ports::outgoing::vector_index::{VectorIndex, VectorQuery};

/// Composes C5 (embed the query) and C6 (query the index, scoped to the
/// reader's own sessions) behind the single read-only endpoint spec §4.8
/// describes. Never infers ownership inside the vector store itself: the
/// session id allowlist is resolved here and handed to `VectorIndex::query`.
pub struct SemanticSearchService<P: PrincipalRepository, S: SessionRepository, V: VectorIndex> {
    principals: Arc<P>,
    sessions: Arc<S>,
    vector_index: Arc<V>,
    providers: Arc<ProviderRouter>,
}

impl<P: PrincipalRepository, S: SessionRepository, V: VectorIndex> SemanticSearchService<P, S, V> {
    pub fn new(
        principals: Arc<P>,
        sessions: Arc<S>,
        vector_index: Arc<V>,
        providers: Arc<ProviderRouter>,
    ) -> Self {
        Self { principals, sessions, vector_index, providers }
    }
}

#[async_trait]
impl<P: PrincipalRepository, S: SessionRepository, V: VectorIndex> SemanticSearchUseCase
    for SemanticSearchService<P, S, V>
{
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        input: SemanticSearchInput,
    ) -> Result<Vec<SearchHit>, SemanticSearchError> {
        if input.query.trim().is_empty() {
            return Err(SemanticSearchError::EmptyQuery);
        }

        let principal = resolve_principal(self.principals.as_ref(), &identity)
            .await
            .map_err(|e| SemanticSearchError::PrincipalError(e.to_string()))?;

        let owned_session_ids = self
            .sessions
            .list_owned_ids(principal.id)
            .await
            .map_err(|e| SemanticSearchError::PrincipalError(e.to_string()))?;

        if owned_session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let embedding = self
            .providers
            .embed(&input.query)
            .await
            .map_err(|e| SemanticSearchError::ProviderError(e.to_string()))?;

        let matches = self
            .vector_index
            .query(VectorQuery {
                embedding: &embedding,
                session_ids: &owned_session_ids,
                provider: Some(self.providers.embedding_provider_name()),
                top_k: input.limit,
                min_similarity: input.min_similarity,
            })
            .await
            .map_err(|e| SemanticSearchError::VectorIndexError(e.to_string()))?;

        Ok(matches
            .into_iter()
            .map(|m| SearchHit {
                session_id: m.session_id,
                block_id: m.block_id,
                text: m.chunk_text,
                similarity: (1.0 - m.distance as f32).clamp(0.0, 1.0),
                provider: self.providers.embedding_provider_name().to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::principal::application::domain::entities::Principal;
    use crate::modules::principal::application::ports::outgoing::principal_repository::PrincipalRepositoryError;
    use crate::modules::session::application::domain::entities::{Block, NewBlock, Session};
    use crate::modules::session::application::ports::outgoing::session_repository::SessionRepositoryError;
    use crate::modules::provider::application::domain::entities::{BlockText, ImageReference, Language};
    use crate::modules::provider::application::ports::outgoing::llm_provider::{
        ChatProvider, EmbeddingProvider, ProviderFailure, SpeechProvider, VisionProvider,
    };
    use crate::modules::vector::application::domain::entities::VectorMatch;
    use crate::modules::vector::application::ports::outgoing::vector_index::VectorIndexError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::path::Path;
    use uuid::Uuid;

    struct FakePrincipals(Uuid);

    #[async_trait]
    impl PrincipalRepository for FakePrincipals {
        async fn get_or_create_by_subject(
            &self,
            _subject: &str,
            _email: Option<&str>,
        ) -> Result<Principal, PrincipalRepositoryError> {
            Ok(Principal {
                id: self.0,
                external_subject: "sub".into(),
                email: None,
                credits: 0,
                push_token: None,
                preferred_language: "pt".into(),
                payment_customer_handle: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Principal, PrincipalRepositoryError> {
            unimplemented!()
        }

        async fn set_push_token(&self, _id: Uuid, _token: &str) -> Result<(), PrincipalRepositoryError> {
            unimplemented!()
        }

        async fn set_preferred_language(&self, _id: Uuid, _language: &str) -> Result<(), PrincipalRepositoryError> {
            unimplemented!()
        }

        async fn set_payment_customer_handle(&self, _id: Uuid, _handle: &str) -> Result<(), PrincipalRepositoryError> {
            unimplemented!()
        }
    }

    struct FakeSessions(Vec<Uuid>);

    #[async_trait]
    impl SessionRepository for FakeSessions {
        async fn create(
            &self,
            _owner: Uuid,
            _session_type: &str,
            _language: Option<&str>,
        ) -> Result<Session, SessionRepositoryError> {
            unimplemented!()
        }

        async fn append_block(
            &self,
            _session_id: Uuid,
            _owner: Uuid,
            _block: NewBlock,
        ) -> Result<Block, SessionRepositoryError> {
            unimplemented!()
        }

        async fn get(&self, _session_id: Uuid, _owner: Uuid) -> Result<Option<Session>, SessionRepositoryError> {
            unimplemented!()
        }

        async fn list_blocks(&self, _session_id: Uuid, _owner: Uuid) -> Result<Vec<Block>, SessionRepositoryError> {
            unimplemented!()
        }

        async fn delete(&self, _session_id: Uuid, _owner: Uuid) -> Result<Vec<String>, SessionRepositoryError> {
            unimplemented!()
        }

        async fn list_owned_ids(&self, _owner: Uuid) -> Result<Vec<Uuid>, SessionRepositoryError> {
            Ok(self.0.clone())
        }
    }

    struct FakeVectorIndex {
        matches: Vec<VectorMatch>,
    }

    #[async_trait]
    impl VectorIndex for FakeVectorIndex {
        async fn upsert(
            &self,
            _session_id: Uuid,
            _block_id: Option<Uuid>,
            _provider: &str,
            _chunk_text: &str,
            _embedding: &[f32],
        ) -> Result<Uuid, VectorIndexError> {
            unimplemented!()
        }

        async fn delete_by_session(&self, _session_id: Uuid) -> Result<(), VectorIndexError> {
            unimplemented!()
        }

        async fn query(&self, _query: VectorQuery<'_>) -> Result<Vec<VectorMatch>, VectorIndexError> {
            Ok(self.matches.clone())
        }
    }

    struct PanicsIfCalled;

    #[async_trait]
    impl ChatProvider for PanicsIfCalled {
        fn name(&self) -> &'static str {
            "panics"
        }
        async fn summarize(&self, _blocks: &[BlockText], _language: Language) -> Result<String, ProviderFailure> {
            panic!("chat provider should not be called by search")
        }
        async fn title(&self, _text: &str, _language: Language) -> Result<String, ProviderFailure> {
            panic!("chat provider should not be called by search")
        }
    }

    #[async_trait]
    impl SpeechProvider for PanicsIfCalled {
        fn name(&self) -> &'static str {
            "panics"
        }
        async fn transcribe(
            &self,
            _audio_path: &Path,
            _language: Option<&str>,
            _hint: Option<&str>,
        ) -> Result<String, ProviderFailure> {
            panic!("speech provider should not be called by search")
        }
    }

    #[async_trait]
    impl VisionProvider for PanicsIfCalled {
        fn name(&self) -> &'static str {
            "panics"
        }
        async fn describe_image(
            &self,
            _reference: &ImageReference,
            _language: Language,
        ) -> Result<String, ProviderFailure> {
            panic!("vision provider should not be called by search")
        }
    }

    struct PanicsIfEmbedCalled;

    #[async_trait]
    impl EmbeddingProvider for PanicsIfEmbedCalled {
        fn name(&self) -> &'static str {
            "panics"
        }
        fn dimension(&self) -> usize {
            8
        }
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderFailure> {
            panic!("embedding provider should not be called for a reader with no sessions")
        }
    }

    fn router_that_panics_if_used() -> Arc<ProviderRouter> {
        Arc::new(ProviderRouter::new(
            Arc::new(PanicsIfCalled),
            Arc::new(PanicsIfEmbedCalled),
            Arc::new(PanicsIfCalled),
            None,
            Arc::new(PanicsIfCalled),
            None,
        ))
    }

    #[tokio::test]
    async fn a_reader_with_no_sessions_gets_no_hits_without_calling_the_provider() {
        let owner = Uuid::new_v4();
        let service = SemanticSearchService::new(
            Arc::new(FakePrincipals(owner)),
            Arc::new(FakeSessions(vec![])),
            Arc::new(FakeVectorIndex { matches: vec![] }),
            router_that_panics_if_used(),
        );

        let identity = VerifiedIdentity { subject: "sub".into(), email: None };
        let hits = service
            .execute(identity, SemanticSearchInput { query: "planning".into(), limit: 10, min_similarity: 0.0 })
            .await
            .expect("empty-session search must not error");

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn a_blank_query_is_rejected_before_touching_any_dependency() {
        let owner = Uuid::new_v4();
        let service = SemanticSearchService::new(
            Arc::new(FakePrincipals(owner)),
            Arc::new(FakeSessions(vec![owner])),
            Arc::new(FakeVectorIndex { matches: vec![] }),
            router_that_panics_if_used(),
        );

        let identity = VerifiedIdentity { subject: "sub".into(), email: None };
        let err = service
            .execute(identity, SemanticSearchInput { query: "   ".into(), limit: 10, min_similarity: 0.0 })
            .await
            .unwrap_err();

        assert!(matches!(err, SemanticSearchError::EmptyQuery));
    }

    #[test]
    fn similarity_is_clamped_into_zero_one() {
        let m = VectorMatch {
            embedding_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            block_id: None,
            chunk_text: "hi".into(),
            distance: 1.5,
        };
        let similarity = (1.0 - m.distance as f32).clamp(0.0, 1.0);
        assert_eq!(similarity, 0.0);
    }
}
