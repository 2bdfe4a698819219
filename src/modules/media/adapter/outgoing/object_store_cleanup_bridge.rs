use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::media::application::ports::outgoing::object_store_gateway::ObjectStoreGateway;
use crate::modules::session::application::ports::outgoing::object_store_cleanup::ObjectStoreCleanup;

/// Satisfies `modules::session`'s `ObjectStoreCleanup` port with the real
/// gateway, without giving `modules::session` a source dependency on this
/// module — the wiring happens only in `AppState` construction.
pub struct ObjectStoreCleanupBridge<G: ObjectStoreGateway> {
    gateway: Arc<G>,
}

impl<G: ObjectStoreGateway> ObjectStoreCleanupBridge<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: ObjectStoreGateway> ObjectStoreCleanup for ObjectStoreCleanupBridge<G> {
    async fn delete_many(&self, object_keys: Vec<String>) {
        if let Err(e) = self.gateway.delete_many(object_keys).await {
            tracing::warn!("best-effort media cleanup after session delete failed: {e}");
        }
    }
}
