//! Prometheus metrics registry, exposed at `GET /metrics` (spec §6 Observability surface).
//!
//! The teacher carries no metrics dependency; `prometheus` is added fresh for this
//! surface since spec §6 names it as a concrete part of the core, not an excluded
//! Non-goal. One process-wide `Metrics` handle is built at startup and cloned into
//! `AppState`, the same way the teacher threads use cases through `Arc`.

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Registry, TextEncoder};

pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub sessions_created_total: IntCounterVec,
    pub sessions_finalized_total: IntCounterVec,
    pub ai_jobs_total: IntCounterVec,
    pub ai_job_duration_seconds: HistogramVec,
    pub provider_requests_total: IntCounterVec,
    pub provider_failures_total: IntCounterVec,
    pub provider_latency_seconds: HistogramVec,
    pub provider_tokens_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            prometheus::Opts::new("http_requests_total", "Total HTTP requests handled"),
            &["method", "path", "status"],
        )
        .expect("valid metric");
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            ),
            &["method", "path", "status"],
        )
        .expect("valid metric");
        let sessions_created_total = IntCounterVec::new(
            prometheus::Opts::new("sessions_created_total", "Sessions created"),
            &["session_type"],
        )
        .expect("valid metric");
        let sessions_finalized_total = IntCounterVec::new(
            prometheus::Opts::new("sessions_finalized_total", "Sessions finalized"),
            &["outcome"],
        )
        .expect("valid metric");
        let ai_jobs_total = IntCounterVec::new(
            prometheus::Opts::new("ai_jobs_total", "AI jobs by job_type and status"),
            &["job_type", "status"],
        )
        .expect("valid metric");
        let ai_job_duration_seconds = HistogramVec::new(
            HistogramOpts::new("ai_job_duration_seconds", "AI job wall-clock duration"),
            &["job_type", "status"],
        )
        .expect("valid metric");
        let provider_requests_total = IntCounterVec::new(
            prometheus::Opts::new("provider_requests_total", "Provider calls attempted"),
            &["provider", "operation"],
        )
        .expect("valid metric");
        let provider_failures_total = IntCounterVec::new(
            prometheus::Opts::new("provider_failures_total", "Provider calls that failed"),
            &["provider", "operation"],
        )
        .expect("valid metric");
        let provider_latency_seconds = HistogramVec::new(
            HistogramOpts::new("provider_latency_seconds", "Provider call latency"),
            &["provider", "operation"],
        )
        .expect("valid metric");
        let provider_tokens_total = IntCounterVec::new(
            prometheus::Opts::new("provider_tokens_total", "Provider token usage"),
            &["provider", "operation"],
        )
        .expect("valid metric");

        for collector in [
            Box::new(http_requests_total.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(http_request_duration_seconds.clone()),
            Box::new(sessions_created_total.clone()),
            Box::new(sessions_finalized_total.clone()),
            Box::new(ai_jobs_total.clone()),
            Box::new(ai_job_duration_seconds.clone()),
            Box::new(provider_requests_total.clone()),
            Box::new(provider_failures_total.clone()),
            Box::new(provider_latency_seconds.clone()),
            Box::new(provider_tokens_total.clone()),
        ] {
            registry
                .register(collector)
                .expect("metric registered only once");
        }

        Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            sessions_created_total,
            sessions_finalized_total,
            ai_jobs_total,
            ai_job_duration_seconds,
            provider_requests_total,
            provider_failures_total,
            provider_latency_seconds,
            provider_tokens_total,
        }
    }

    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
