pub mod job_broker_redis;
pub mod pipeline_repository_postgres;
