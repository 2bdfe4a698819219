use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::media::application::ports::incoming::use_cases::commit_media::{
    CommitMediaError, CommitMediaUseCase,
};
use crate::modules::media::application::ports::incoming::use_cases::delete_media::{
    DeleteMediaError, DeleteMediaUseCase,
};
use crate::modules::media::application::ports::incoming::use_cases::presign_media::{
    PresignMediaError, PresignMediaInput, PresignMediaOutput, PresignMediaUseCase,
};
use crate::modules::payment::application::domain::catalog::CreditPackage;
use crate::modules::payment::application::ports::incoming::use_cases::create_checkout::{
    CreateCheckoutError, CreateCheckoutInput, CreateCheckoutOutput, CreateCheckoutUseCase,
};
use crate::modules::payment::application::ports::incoming::use_cases::create_payment_intent::{
    CreatePaymentIntentError, CreatePaymentIntentInput, CreatePaymentIntentOutput,
    CreatePaymentIntentUseCase,
};
use crate::modules::payment::application::ports::incoming::use_cases::handle_webhook::{
    HandleWebhookError, HandleWebhookUseCase, ReconcileOutcome,
};
use crate::modules::payment::application::ports::incoming::use_cases::list_packages::ListPackagesUseCase;
use crate::modules::principal::application::ports::incoming::use_cases::get_me::{
    GetMeError, GetMeUseCase, MeOutput,
};
use crate::modules::principal::application::ports::incoming::use_cases::set_preferred_language::{
    SetPreferredLanguageError, SetPreferredLanguageUseCase,
};
use crate::modules::principal::application::ports::incoming::use_cases::set_push_token::{
    SetPushTokenError, SetPushTokenUseCase,
};
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::search::application::domain::entities::SearchHit;
use crate::modules::search::application::ports::incoming::use_cases::semantic_search::{
    SemanticSearchError, SemanticSearchInput, SemanticSearchUseCase,
};
use crate::modules::session::application::domain::entities::{Block, Session};
use crate::modules::session::application::ports::incoming::use_cases::append_block::{
    AppendBlockError, AppendBlockInput, AppendBlockUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::create_session::{
    CreateSessionError, CreateSessionUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::delete_session::{
    DeleteSessionError, DeleteSessionUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::finalize_session::{
    FinalizeSessionError, FinalizeSessionOutput, FinalizeSessionUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::get_session::{
    GetSessionError, GetSessionUseCase, ListBlocksUseCase,
};

#[derive(Default, Clone)]
pub struct StubCreateSessionUseCase;

#[async_trait]
impl CreateSessionUseCase for StubCreateSessionUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_type: String,
        _language: Option<String>,
    ) -> Result<Session, CreateSessionError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubAppendBlockUseCase;

#[async_trait]
impl AppendBlockUseCase for StubAppendBlockUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_id: Uuid,
        _input: AppendBlockInput,
    ) -> Result<Block, AppendBlockError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubFinalizeSessionUseCase;

#[async_trait]
impl FinalizeSessionUseCase for StubFinalizeSessionUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_id: Uuid,
    ) -> Result<FinalizeSessionOutput, FinalizeSessionError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubGetSessionUseCase;

#[async_trait]
impl GetSessionUseCase for StubGetSessionUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_id: Uuid,
    ) -> Result<Session, GetSessionError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubListBlocksUseCase;

#[async_trait]
impl ListBlocksUseCase for StubListBlocksUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_id: Uuid,
    ) -> Result<Vec<Block>, GetSessionError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubDeleteSessionUseCase;

#[async_trait]
impl DeleteSessionUseCase for StubDeleteSessionUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_id: Uuid,
    ) -> Result<(), DeleteSessionError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubPresignMediaUseCase;

#[async_trait]
impl PresignMediaUseCase for StubPresignMediaUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _input: PresignMediaInput,
    ) -> Result<PresignMediaOutput, PresignMediaError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubCommitMediaUseCase;

#[async_trait]
impl CommitMediaUseCase for StubCommitMediaUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _media_id: Uuid,
        _size_bytes: Option<i64>,
    ) -> Result<crate::modules::media::application::domain::entities::MediaFile, CommitMediaError>
    {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubDeleteMediaUseCase;

#[async_trait]
impl DeleteMediaUseCase for StubDeleteMediaUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _session_id: Uuid,
        _media_id: Uuid,
    ) -> Result<(), DeleteMediaError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubGetMeUseCase;

#[async_trait]
impl GetMeUseCase for StubGetMeUseCase {
    async fn execute(&self, _identity: VerifiedIdentity) -> Result<MeOutput, GetMeError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSetPushTokenUseCase;

#[async_trait]
impl SetPushTokenUseCase for StubSetPushTokenUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _token: String,
    ) -> Result<(), SetPushTokenError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSetPreferredLanguageUseCase;

#[async_trait]
impl SetPreferredLanguageUseCase for StubSetPreferredLanguageUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _language: String,
    ) -> Result<(), SetPreferredLanguageError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubListPackagesUseCase;

#[async_trait]
impl ListPackagesUseCase for StubListPackagesUseCase {
    async fn execute(&self) -> Vec<CreditPackage> {
        vec![]
    }
}

#[derive(Default, Clone)]
pub struct StubCreateCheckoutUseCase;

#[async_trait]
impl CreateCheckoutUseCase for StubCreateCheckoutUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _input: CreateCheckoutInput,
    ) -> Result<CreateCheckoutOutput, CreateCheckoutError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubCreatePaymentIntentUseCase;

#[async_trait]
impl CreatePaymentIntentUseCase for StubCreatePaymentIntentUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _input: CreatePaymentIntentInput,
    ) -> Result<CreatePaymentIntentOutput, CreatePaymentIntentError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubHandleWebhookUseCase;

#[async_trait]
impl HandleWebhookUseCase for StubHandleWebhookUseCase {
    async fn execute(
        &self,
        _provider: &str,
        _payload: &[u8],
        _signature_header: &str,
    ) -> Result<ReconcileOutcome, HandleWebhookError> {
        unimplemented!("not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSemanticSearchUseCase;

#[async_trait]
impl SemanticSearchUseCase for StubSemanticSearchUseCase {
    async fn execute(
        &self,
        _identity: VerifiedIdentity,
        _input: SemanticSearchInput,
    ) -> Result<Vec<SearchHit>, SemanticSearchError> {
        unimplemented!("not used in this test")
    }
}
