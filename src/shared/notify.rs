//! Fire-and-forget push notification sink.
//!
//! Mirrors `original_source/app/services/fcm_service.py`: the pipeline pings the
//! user on completion, but a notification failure must never fail the job (spec
//! §4.6 Stage C, "Best-effort"). Delivery itself is out of scope per spec §1 — no
//! real FCM SDK is wired in; `LoggingPushNotifier` is the shipped adapter and a
//! real one can implement the same trait later without touching call sites.

use async_trait::async_trait;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushEvent {
    SessionReady,
}

impl PushEvent {
    fn as_str(self) -> &'static str {
        match self {
            PushEvent::SessionReady => "session_ready",
        }
    }
}

#[async_trait]
pub trait PushNotifier: Send + Sync {
    async fn notify(&self, push_token: Option<&str>, event: PushEvent, session_id: uuid::Uuid);
}

pub struct LoggingPushNotifier;

#[async_trait]
impl PushNotifier for LoggingPushNotifier {
    async fn notify(&self, push_token: Option<&str>, event: PushEvent, session_id: uuid::Uuid) {
        match push_token {
            Some(_) => info!(
                event = event.as_str(),
                session_id = %session_id,
                "push notification dispatched"
            ),
            None => warn!(
                event = event.as_str(),
                session_id = %session_id,
                "no push token on file, skipping notification"
            ),
        }
    }
}
