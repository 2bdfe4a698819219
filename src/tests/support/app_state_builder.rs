use crate::modules::media::application::ports::incoming::use_cases::commit_media::CommitMediaUseCase;
use crate::modules::media::application::ports::incoming::use_cases::delete_media::DeleteMediaUseCase;
use crate::modules::media::application::ports::incoming::use_cases::presign_media::PresignMediaUseCase;
use crate::modules::payment::application::ports::incoming::use_cases::create_checkout::CreateCheckoutUseCase;
use crate::modules::payment::application::ports::incoming::use_cases::create_payment_intent::CreatePaymentIntentUseCase;
use crate::modules::payment::application::ports::incoming::use_cases::handle_webhook::HandleWebhookUseCase;
use crate::modules::payment::application::ports::incoming::use_cases::list_packages::ListPackagesUseCase;
use crate::modules::principal::application::ports::incoming::use_cases::get_me::GetMeUseCase;
use crate::modules::principal::application::ports::incoming::use_cases::set_preferred_language::SetPreferredLanguageUseCase;
use crate::modules::principal::application::ports::incoming::use_cases::set_push_token::SetPushTokenUseCase;
use crate::modules::search::application::ports::incoming::use_cases::semantic_search::SemanticSearchUseCase;
use crate::modules::session::application::ports::incoming::use_cases::append_block::AppendBlockUseCase;
use crate::modules::session::application::ports::incoming::use_cases::create_session::CreateSessionUseCase;
use crate::modules::session::application::ports::incoming::use_cases::delete_session::DeleteSessionUseCase;
use crate::modules::session::application::ports::incoming::use_cases::finalize_session::FinalizeSessionUseCase;
use crate::modules::session::application::ports::incoming::use_cases::get_session::{
    GetSessionUseCase, ListBlocksUseCase,
};
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    create_session: Option<Arc<dyn CreateSessionUseCase + Send + Sync>>,
    append_block: Option<Arc<dyn AppendBlockUseCase + Send + Sync>>,
    finalize_session: Option<Arc<dyn FinalizeSessionUseCase + Send + Sync>>,
    get_session: Option<Arc<dyn GetSessionUseCase + Send + Sync>>,
    list_blocks: Option<Arc<dyn ListBlocksUseCase + Send + Sync>>,
    delete_session: Option<Arc<dyn DeleteSessionUseCase + Send + Sync>>,
    presign_media: Option<Arc<dyn PresignMediaUseCase + Send + Sync>>,
    commit_media: Option<Arc<dyn CommitMediaUseCase + Send + Sync>>,
    delete_media: Option<Arc<dyn DeleteMediaUseCase + Send + Sync>>,
    get_me: Option<Arc<dyn GetMeUseCase + Send + Sync>>,
    set_push_token: Option<Arc<dyn SetPushTokenUseCase + Send + Sync>>,
    set_preferred_language: Option<Arc<dyn SetPreferredLanguageUseCase + Send + Sync>>,
    list_packages: Option<Arc<dyn ListPackagesUseCase + Send + Sync>>,
    create_checkout: Option<Arc<dyn CreateCheckoutUseCase + Send + Sync>>,
    create_payment_intent: Option<Arc<dyn CreatePaymentIntentUseCase + Send + Sync>>,
    handle_webhook: Option<Arc<dyn HandleWebhookUseCase + Send + Sync>>,
    semantic_search: Option<Arc<dyn SemanticSearchUseCase + Send + Sync>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            create_session: Some(Arc::new(StubCreateSessionUseCase)),
            append_block: Some(Arc::new(StubAppendBlockUseCase)),
            finalize_session: Some(Arc::new(StubFinalizeSessionUseCase)),
            get_session: Some(Arc::new(StubGetSessionUseCase)),
            list_blocks: Some(Arc::new(StubListBlocksUseCase)),
            delete_session: Some(Arc::new(StubDeleteSessionUseCase)),
            presign_media: Some(Arc::new(StubPresignMediaUseCase)),
            commit_media: Some(Arc::new(StubCommitMediaUseCase)),
            delete_media: Some(Arc::new(StubDeleteMediaUseCase)),
            get_me: Some(Arc::new(StubGetMeUseCase)),
            set_push_token: Some(Arc::new(StubSetPushTokenUseCase)),
            set_preferred_language: Some(Arc::new(StubSetPreferredLanguageUseCase)),
            list_packages: Some(Arc::new(StubListPackagesUseCase)),
            create_checkout: Some(Arc::new(StubCreateCheckoutUseCase)),
            create_payment_intent: Some(Arc::new(StubCreatePaymentIntentUseCase)),
            handle_webhook: Some(Arc::new(StubHandleWebhookUseCase)),
            semantic_search: Some(Arc::new(StubSemanticSearchUseCase)),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_create_session(
        mut self,
        uc: impl CreateSessionUseCase + Send + Sync + 'static,
    ) -> Self {
        self.create_session = Some(Arc::new(uc));
        self
    }

    pub fn with_append_block(mut self, uc: impl AppendBlockUseCase + Send + Sync + 'static) -> Self {
        self.append_block = Some(Arc::new(uc));
        self
    }

    pub fn with_finalize_session(
        mut self,
        uc: impl FinalizeSessionUseCase + Send + Sync + 'static,
    ) -> Self {
        self.finalize_session = Some(Arc::new(uc));
        self
    }

    pub fn with_get_session(mut self, uc: impl GetSessionUseCase + Send + Sync + 'static) -> Self {
        self.get_session = Some(Arc::new(uc));
        self
    }

    pub fn with_list_blocks(mut self, uc: impl ListBlocksUseCase + Send + Sync + 'static) -> Self {
        self.list_blocks = Some(Arc::new(uc));
        self
    }

    pub fn with_delete_session(
        mut self,
        uc: impl DeleteSessionUseCase + Send + Sync + 'static,
    ) -> Self {
        self.delete_session = Some(Arc::new(uc));
        self
    }

    pub fn with_presign_media(
        mut self,
        uc: impl PresignMediaUseCase + Send + Sync + 'static,
    ) -> Self {
        self.presign_media = Some(Arc::new(uc));
        self
    }

    pub fn with_commit_media(mut self, uc: impl CommitMediaUseCase + Send + Sync + 'static) -> Self {
        self.commit_media = Some(Arc::new(uc));
        self
    }

    pub fn with_delete_media(mut self, uc: impl DeleteMediaUseCase + Send + Sync + 'static) -> Self {
        self.delete_media = Some(Arc::new(uc));
        self
    }

    pub fn with_get_me(mut self, uc: impl GetMeUseCase + Send + Sync + 'static) -> Self {
        self.get_me = Some(Arc::new(uc));
        self
    }

    pub fn with_set_push_token(
        mut self,
        uc: impl SetPushTokenUseCase + Send + Sync + 'static,
    ) -> Self {
        self.set_push_token = Some(Arc::new(uc));
        self
    }

    pub fn with_set_preferred_language(
        mut self,
        uc: impl SetPreferredLanguageUseCase + Send + Sync + 'static,
    ) -> Self {
        self.set_preferred_language = Some(Arc::new(uc));
        self
    }

    pub fn with_list_packages(mut self, uc: impl ListPackagesUseCase + Send + Sync + 'static) -> Self {
        self.list_packages = Some(Arc::new(uc));
        self
    }

    pub fn with_create_checkout(
        mut self,
        uc: impl CreateCheckoutUseCase + Send + Sync + 'static,
    ) -> Self {
        self.create_checkout = Some(Arc::new(uc));
        self
    }

    pub fn with_create_payment_intent(
        mut self,
        uc: impl CreatePaymentIntentUseCase + Send + Sync + 'static,
    ) -> Self {
        self.create_payment_intent = Some(Arc::new(uc));
        self
    }

    pub fn with_handle_webhook(
        mut self,
        uc: impl HandleWebhookUseCase + Send + Sync + 'static,
    ) -> Self {
        self.handle_webhook = Some(Arc::new(uc));
        self
    }

    pub fn with_semantic_search(
        mut self,
        uc: impl SemanticSearchUseCase + Send + Sync + 'static,
    ) -> Self {
        self.semantic_search = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            create_session_use_case: self.create_session.unwrap(),
            append_block_use_case: self.append_block.unwrap(),
            finalize_session_use_case: self.finalize_session.unwrap(),
            get_session_use_case: self.get_session.unwrap(),
            list_blocks_use_case: self.list_blocks.unwrap(),
            delete_session_use_case: self.delete_session.unwrap(),
            presign_media_use_case: self.presign_media.unwrap(),
            commit_media_use_case: self.commit_media.unwrap(),
            delete_media_use_case: self.delete_media.unwrap(),
            get_me_use_case: self.get_me.unwrap(),
            set_push_token_use_case: self.set_push_token.unwrap(),
            set_preferred_language_use_case: self.set_preferred_language.unwrap(),
            list_packages_use_case: self.list_packages.unwrap(),
            create_checkout_use_case: self.create_checkout.unwrap(),
            create_payment_intent_use_case: self.create_payment_intent.unwrap(),
            handle_webhook_use_case: self.handle_webhook.unwrap(),
            semantic_search_use_case: self.semantic_search.unwrap(),
        })
    }
}
