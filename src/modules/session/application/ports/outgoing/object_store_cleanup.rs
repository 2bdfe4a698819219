use async_trait::async_trait;

/// The session delete use case needs to remove the objects backing a
/// session's media rows (spec §4.1 delete, §4.3 C1 `delete_many`), but the
/// object store itself lives behind `modules::media`. This port lets the
/// media module's gateway be injected here without a module-to-module
/// source dependency.
#[async_trait]
pub trait ObjectStoreCleanup: Send + Sync {
    /// Best-effort: failures are logged by the implementation, never
    /// propagated — a stray object is harmless, an undeleted session row
    /// would not be.
    async fn delete_many(&self, object_keys: Vec<String>);
}
