pub use session_pipeline::modules;

// session/media/principal/payment/search/credit module resources
use crate::modules::credit::adapter::outgoing::credit_ledger_postgres::CreditLedgerPostgres;
use crate::modules::media::adapter::outgoing::media_repository_postgres::MediaRepositoryPostgres;
use crate::modules::media::adapter::outgoing::object_store_cleanup_bridge::ObjectStoreCleanupBridge;
use crate::modules::media::adapter::outgoing::object_store_s3::S3ObjectStoreGateway;
use crate::modules::media::application::domain::upload_policy::UploadPolicy;
use crate::modules::media::application::ports::incoming::use_cases::commit_media::{
    CommitMediaError, CommitMediaUseCase,
};
use crate::modules::media::application::ports::incoming::use_cases::delete_media::{
    DeleteMediaError, DeleteMediaUseCase,
};
use crate::modules::media::application::ports::incoming::use_cases::presign_media::{
    PresignMediaError, PresignMediaUseCase,
};
use crate::modules::media::application::service::commit_media_service::CommitMediaService;
use crate::modules::media::application::service::delete_media_service::DeleteMediaService;
use crate::modules::media::application::service::presign_media_service::PresignMediaService;
use crate::modules::payment::adapter::outgoing::payment_repository_postgres::PaymentRepositoryPostgres;
use crate::modules::payment::adapter::outgoing::payments_provider_stripe::StripePaymentsProvider;
use crate::modules::payment::application::ports::incoming::use_cases::create_checkout::{
    CreateCheckoutError, CreateCheckoutUseCase,
};
use crate::modules::payment::application::ports::incoming::use_cases::create_payment_intent::{
    CreatePaymentIntentError, CreatePaymentIntentUseCase,
};
use crate::modules::payment::application::ports::incoming::use_cases::handle_webhook::{
    HandleWebhookError, HandleWebhookUseCase, ReconcileOutcome,
};
use crate::modules::payment::application::ports::incoming::use_cases::list_packages::ListPackagesUseCase;
use crate::modules::payment::application::service::payment_service::PaymentService;
use crate::modules::payment::application::service::webhook_reconciler::WebhookReconciler;
use crate::modules::principal::adapter::outgoing::jwt_identity_verifier::JwtIdentityVerifier;
use crate::modules::principal::adapter::outgoing::principal_repository_postgres::PrincipalRepositoryPostgres;
use crate::modules::principal::application::ports::incoming::use_cases::get_me::{GetMeError, GetMeUseCase};
use crate::modules::principal::application::ports::incoming::use_cases::set_preferred_language::{
    SetPreferredLanguageError, SetPreferredLanguageUseCase,
};
use crate::modules::principal::application::ports::incoming::use_cases::set_push_token::{
    SetPushTokenError, SetPushTokenUseCase,
};
use crate::modules::principal::application::ports::outgoing::identity_verifier::IdentityVerifier;
use crate::modules::principal::application::service::get_me_service::GetMeService;
use crate::modules::principal::application::service::set_preferred_language_service::SetPreferredLanguageService;
use crate::modules::principal::application::service::set_push_token_service::SetPushTokenService;
use crate::modules::provider::application::service::router_factory::build_provider_router;
use crate::modules::search::application::ports::incoming::use_cases::semantic_search::{
    SemanticSearchError, SemanticSearchUseCase,
};
use crate::modules::search::application::service::semantic_search_service::SemanticSearchService;
use crate::modules::session::adapter::outgoing::finalize_transaction_postgres::FinalizeTransactionPostgres;
use crate::modules::session::adapter::outgoing::session_repository_postgres::SessionRepositoryPostgres;
use crate::modules::session::application::ports::incoming::use_cases::append_block::{
    AppendBlockError, AppendBlockUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::create_session::{
    CreateSessionError, CreateSessionUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::delete_session::{
    DeleteSessionError, DeleteSessionUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::finalize_session::{
    FinalizeSessionError, FinalizeSessionUseCase,
};
use crate::modules::session::application::ports::incoming::use_cases::get_session::{
    GetSessionError, GetSessionUseCase, ListBlocksUseCase,
};
use crate::modules::session::application::service::append_block_service::AppendBlockService;
use crate::modules::session::application::service::create_session_service::CreateSessionService;
use crate::modules::session::application::service::delete_session_service::DeleteSessionService;
use crate::modules::session::application::service::finalize_session_service::FinalizeSessionService;
use crate::modules::session::application::service::get_session_service::GetSessionService;
use crate::modules::vector::adapter::outgoing::vector_index_postgres::VectorIndexPostgres;
use crate::shared::config::AppConfig;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;

// Logging
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    // Sessions (C4)
    pub create_session_use_case: Arc<dyn CreateSessionUseCase>,
    pub append_block_use_case: Arc<dyn AppendBlockUseCase>,
    pub finalize_session_use_case: Arc<dyn FinalizeSessionUseCase>,
    pub get_session_use_case: Arc<dyn GetSessionUseCase>,
    pub list_blocks_use_case: Arc<dyn ListBlocksUseCase>,
    pub delete_session_use_case: Arc<dyn DeleteSessionUseCase>,
    // Media (C1/C10)
    pub presign_media_use_case: Arc<dyn PresignMediaUseCase>,
    pub commit_media_use_case: Arc<dyn CommitMediaUseCase>,
    pub delete_media_use_case: Arc<dyn DeleteMediaUseCase>,
    // Principal (C2/C3)
    pub get_me_use_case: Arc<dyn GetMeUseCase>,
    pub set_push_token_use_case: Arc<dyn SetPushTokenUseCase>,
    pub set_preferred_language_use_case: Arc<dyn SetPreferredLanguageUseCase>,
    // Payments (C8)
    pub list_packages_use_case: Arc<dyn ListPackagesUseCase>,
    pub create_checkout_use_case: Arc<dyn CreateCheckoutUseCase>,
    pub create_payment_intent_use_case: Arc<dyn CreatePaymentIntentUseCase>,
    pub handle_webhook_use_case: Arc<dyn HandleWebhookUseCase>,
    // Search (C9)
    pub semantic_search_use_case: Arc<dyn SemanticSearchUseCase>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // get env vars
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("invalid configuration");
    let server_url = format!("{}:{}", config.host, config.port);
    info!("Server run on: {}", server_url);

    // 1. establish connection to database
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt
        // Core pool sizing
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        // Timeouts (fail fast instead of piling up)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        // Hygiene
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        // Noise reduction
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // 2) Shared adapters for the session/media/principal/payment/search stack
    let sessions = Arc::new(SessionRepositoryPostgres::new(Arc::clone(&db_arc)));
    let media = Arc::new(MediaRepositoryPostgres::new(Arc::clone(&db_arc)));
    let gateway = Arc::new(S3ObjectStoreGateway::new(&config));
    let principals = Arc::new(PrincipalRepositoryPostgres::new(Arc::clone(&db_arc)));
    let vector_index = Arc::new(VectorIndexPostgres::new(Arc::clone(&db_arc)));
    let ledger = Arc::new(CreditLedgerPostgres::new(Arc::clone(&db_arc)));
    let payments = Arc::new(PaymentRepositoryPostgres::new(Arc::clone(&db_arc)));
    let providers = Arc::new(build_provider_router(&config).expect("invalid provider configuration"));

    let identity_verifier: Arc<dyn IdentityVerifier> =
        Arc::new(JwtIdentityVerifier::new(&config.jwt_secret));

    let upload_policy = UploadPolicy::from_env(config.storage_bucket.clone());

    // Sessions
    let create_session_use_case: Arc<dyn CreateSessionUseCase> = Arc::new(CreateSessionService::new(
        Arc::clone(&sessions),
        Arc::clone(&principals),
    ));
    let append_block_use_case: Arc<dyn AppendBlockUseCase> = Arc::new(AppendBlockService::new(
        Arc::clone(&sessions),
        Arc::clone(&principals),
    ));
    let finalize_transaction = Arc::new(FinalizeTransactionPostgres::new(Arc::clone(&db_arc)));
    let finalize_session_use_case: Arc<dyn FinalizeSessionUseCase> = Arc::new(
        FinalizeSessionService::new(finalize_transaction, Arc::clone(&principals)),
    );
    let get_session_service = Arc::new(GetSessionService::new(
        Arc::clone(&sessions),
        Arc::clone(&principals),
    ));
    let get_session_use_case: Arc<dyn GetSessionUseCase> = get_session_service.clone();
    let list_blocks_use_case: Arc<dyn ListBlocksUseCase> = get_session_service;
    let cleanup = Arc::new(ObjectStoreCleanupBridge::new(Arc::clone(&gateway)));
    let delete_session_use_case: Arc<dyn DeleteSessionUseCase> = Arc::new(DeleteSessionService::new(
        Arc::clone(&sessions),
        Arc::clone(&principals),
        cleanup,
    ));

    // Media
    let presign_media_use_case: Arc<dyn PresignMediaUseCase> = Arc::new(PresignMediaService::new(
        Arc::clone(&media),
        Arc::clone(&gateway),
        Arc::clone(&sessions),
        Arc::clone(&principals),
        upload_policy,
        config.presign_put_ttl,
    ));
    let commit_media_use_case: Arc<dyn CommitMediaUseCase> = Arc::new(CommitMediaService::new(
        Arc::clone(&media),
        Arc::clone(&principals),
    ));
    let delete_media_use_case: Arc<dyn DeleteMediaUseCase> = Arc::new(DeleteMediaService::new(
        Arc::clone(&media),
        Arc::clone(&gateway),
        Arc::clone(&principals),
    ));

    // Principal self-service
    let get_me_use_case: Arc<dyn GetMeUseCase> = Arc::new(GetMeService::new(Arc::clone(&principals)));
    let set_push_token_use_case: Arc<dyn SetPushTokenUseCase> =
        Arc::new(SetPushTokenService::new(Arc::clone(&principals)));
    let set_preferred_language_use_case: Arc<dyn SetPreferredLanguageUseCase> =
        Arc::new(SetPreferredLanguageService::new(Arc::clone(&principals)));

    // Payments
    let payments_provider = Arc::new(StripePaymentsProvider::new(
        config.payments_secret.clone().unwrap_or_default(),
        config.payments_webhook_secret.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        Arc::clone(&payments),
        Arc::clone(&principals),
        Arc::clone(&payments_provider),
    ));
    let list_packages_use_case: Arc<dyn ListPackagesUseCase> = payment_service.clone();
    let create_checkout_use_case: Arc<dyn CreateCheckoutUseCase> = payment_service.clone();
    let create_payment_intent_use_case: Arc<dyn CreatePaymentIntentUseCase> = payment_service;
    let handle_webhook_use_case: Arc<dyn HandleWebhookUseCase> = Arc::new(WebhookReconciler::new(
        payments,
        payments_provider,
        ledger,
    ));

    // Search
    let semantic_search_use_case: Arc<dyn SemanticSearchUseCase> = Arc::new(SemanticSearchService::new(
        Arc::clone(&principals),
        sessions,
        vector_index,
        providers,
    ));

    // 3) Build app state
    let state = AppState {
        create_session_use_case,
        append_block_use_case,
        finalize_session_use_case,
        get_session_use_case,
        list_blocks_use_case,
        delete_session_use_case,
        presign_media_use_case,
        commit_media_use_case,
        delete_media_use_case,
        get_me_use_case,
        set_push_token_use_case,
        set_preferred_language_use_case,
        list_packages_use_case,
        create_checkout_use_case,
        create_payment_intent_use_case,
        handle_webhook_use_case,
        semantic_search_use_case,
    };

    // 4) Start the server
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(identity_verifier.clone()))
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Sessions
    cfg.service(crate::modules::session::adapter::incoming::web::routes::sessions::create_session_handler);
    cfg.service(crate::modules::session::adapter::incoming::web::routes::sessions::append_block_handler);
    cfg.service(crate::modules::session::adapter::incoming::web::routes::sessions::finalize_session_handler);
    cfg.service(crate::modules::session::adapter::incoming::web::routes::sessions::get_session_handler);
    cfg.service(crate::modules::session::adapter::incoming::web::routes::sessions::list_blocks_handler);
    cfg.service(crate::modules::session::adapter::incoming::web::routes::sessions::delete_session_handler);

    // Media / uploads
    cfg.service(crate::modules::media::adapter::incoming::web::routes::media::presign_handler);
    cfg.service(crate::modules::media::adapter::incoming::web::routes::media::commit_handler);
    cfg.service(crate::modules::media::adapter::incoming::web::routes::media::delete_media_handler);

    // Principal self-service
    cfg.service(crate::modules::principal::adapter::incoming::web::routes::me::get_credits_handler);
    cfg.service(crate::modules::principal::adapter::incoming::web::routes::me::set_push_token_handler);
    cfg.service(crate::modules::principal::adapter::incoming::web::routes::me::set_preferred_language_handler);

    // Payments
    cfg.service(crate::modules::payment::adapter::incoming::web::routes::payments::list_packages_handler);
    cfg.service(crate::modules::payment::adapter::incoming::web::routes::payments::create_checkout_handler);
    cfg.service(crate::modules::payment::adapter::incoming::web::routes::payments::create_payment_intent_handler);
    cfg.service(crate::modules::payment::adapter::incoming::web::routes::payments::webhook_handler);

    // Semantic search
    cfg.service(crate::modules::search::adapter::incoming::web::routes::semantic_search::semantic_search_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
