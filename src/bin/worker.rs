//! Background worker process for the AI pipeline (spec §4.6/§5).
//!
//! Mirrors the shape of `main.rs`'s composition root (same config loading,
//! same connection-pool setup) but drives `PipelineOrchestrator::run` in a
//! bounded-concurrency loop instead of an actix-web server. The job broker
//! is only a wake-up signal (see `DESIGN.md`); on every wake-up, timeout, or
//! idle tick the worker asks Postgres directly whether a job is claimable.

use sea_orm::{ConnectOptions, Database};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_pipeline::modules::media::adapter::outgoing::media_repository_postgres::MediaRepositoryPostgres;
use session_pipeline::modules::media::adapter::outgoing::object_store_s3::S3ObjectStoreGateway;
use session_pipeline::modules::pipeline::adapter::outgoing::job_broker_redis::RedisJobBroker;
use session_pipeline::modules::pipeline::adapter::outgoing::pipeline_repository_postgres::PipelineRepositoryPostgres;
use session_pipeline::modules::pipeline::application::ports::outgoing::job_broker::JobBroker;
use session_pipeline::modules::pipeline::application::ports::outgoing::pipeline_repository::PipelineRepository;
use session_pipeline::modules::pipeline::application::service::orchestrator::PipelineOrchestrator;
use session_pipeline::modules::principal::adapter::outgoing::principal_repository_postgres::PrincipalRepositoryPostgres;
use session_pipeline::modules::provider::application::service::router_factory::build_provider_router;
use session_pipeline::modules::vector::adapter::outgoing::vector_index_postgres::VectorIndexPostgres;
use session_pipeline::shared::config::AppConfig;
use session_pipeline::shared::notify::LoggingPushNotifier;

/// How long a single `dequeue` call blocks before falling back to a direct
/// poll of `ai_jobs`; keeps the worker responsive even if Redis is down.
const DEQUEUE_TIMEOUT: Duration = Duration::from_secs(5);
const IDLE_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("invalid configuration");

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db = Arc::new(Database::connect(opt).await.expect("failed to connect to database"));

    let repo: Arc<dyn PipelineRepository> = Arc::new(PipelineRepositoryPostgres::new(Arc::clone(&db)));
    let media = Arc::new(MediaRepositoryPostgres::new(Arc::clone(&db)));
    let gateway = Arc::new(S3ObjectStoreGateway::new(&config));
    let vector = Arc::new(VectorIndexPostgres::new(Arc::clone(&db)));
    let principals = Arc::new(PrincipalRepositoryPostgres::new(Arc::clone(&db)));
    let providers = Arc::new(build_provider_router(&config).expect("invalid provider configuration"));
    let notifier = Arc::new(LoggingPushNotifier);

    let orchestrator = Arc::new(PipelineOrchestrator::new(
        repo.clone(),
        media,
        gateway,
        vector,
        principals,
        providers,
        notifier,
        config.enable_embeddings,
        config.presign_get_ttl,
    ));

    let broker: Arc<dyn JobBroker> = match RedisJobBroker::new(&config.broker_redis_url) {
        Ok(broker) => Arc::new(broker),
        Err(e) => {
            error!("could not initialize job broker, falling back to pure polling: {e}");
            Arc::new(NullJobBroker)
        }
    };

    info!(concurrency = config.worker_concurrency, "worker starting");

    let semaphore = Arc::new(Semaphore::new(config.worker_concurrency));
    let tasks_handled = Arc::new(AtomicU32::new(0));

    loop {
        if tasks_handled.load(Ordering::Relaxed) >= config.worker_recycle_after_tasks {
            info!("recycle threshold reached, exiting for process supervisor restart");
            break;
        }

        match broker.dequeue(DEQUEUE_TIMEOUT).await {
            Ok(_) => {}
            Err(e) => {
                warn!("broker dequeue failed, polling directly: {e}");
                tokio::time::sleep(IDLE_POLL_INTERVAL).await;
            }
        }

        let claimed = match repo.claim_pending_job().await {
            Ok(Some(job)) => job,
            Ok(None) => continue,
            Err(e) => {
                error!("could not claim a pending job: {e}");
                tokio::time::sleep(IDLE_POLL_INTERVAL).await;
                continue;
            }
        };

        let permit = Arc::clone(&semaphore).acquire_owned().await.expect("semaphore closed");
        let orchestrator = Arc::clone(&orchestrator);
        let tasks_handled = Arc::clone(&tasks_handled);
        let hard_timeout = config.job_hard_timeout;
        let job_id = claimed.job_id;

        tokio::spawn(async move {
            let _permit = permit;
            match tokio::time::timeout(hard_timeout, orchestrator.run(claimed)).await {
                Ok(Ok(report)) => {
                    info!(job_id = %job_id, ?report, "pipeline job completed");
                }
                Ok(Err(e)) => {
                    error!(job_id = %job_id, "pipeline job failed: {e}");
                }
                Err(_) => {
                    error!(job_id = %job_id, "pipeline job exceeded hard timeout");
                }
            }
            tasks_handled.fetch_add(1, Ordering::Relaxed);
        });
    }

    // Wait for every in-flight task to release its permit before exiting, so
    // a recycle never truncates a job mid-run.
    let _ = semaphore.acquire_many(config.worker_concurrency as u32).await;
    info!("all in-flight jobs drained, exiting");
}

/// Used only if the Redis broker fails to initialize at startup; the worker
/// still functions correctly on pure polling, just with higher latency.
struct NullJobBroker;

#[async_trait::async_trait]
impl JobBroker for NullJobBroker {
    async fn enqueue(
        &self,
        _job_id: uuid::Uuid,
    ) -> Result<(), session_pipeline::modules::pipeline::application::ports::outgoing::job_broker::JobBrokerError>
    {
        Ok(())
    }

    async fn dequeue(
        &self,
        timeout: Duration,
    ) -> Result<
        Option<uuid::Uuid>,
        session_pipeline::modules::pipeline::application::ports::outgoing::job_broker::JobBrokerError,
    > {
        tokio::time::sleep(timeout.min(IDLE_POLL_INTERVAL)).await;
        Ok(None)
    }
}
