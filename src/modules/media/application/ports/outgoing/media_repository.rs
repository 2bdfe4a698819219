use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::{MediaFile, MediaKind};

#[derive(Debug, Error)]
pub enum MediaRepositoryError {
    #[error("media not found or access denied")]
    NotFoundOrAccessDenied,
    #[error("database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Inserts a new row in `pending` status at presign time.
    async fn insert_pending(
        &self,
        session_id: Uuid,
        kind: MediaKind,
        object_key: &str,
        content_type: &str,
    ) -> Result<MediaFile, MediaRepositoryError>;

    /// Transitions `pending -> uploaded`, recording size. Idempotent: if the
    /// row is already `uploaded`, returns it unchanged.
    async fn commit(
        &self,
        media_id: Uuid,
        owner: Uuid,
        byte_size: Option<i64>,
    ) -> Result<MediaFile, MediaRepositoryError>;

    async fn get(&self, media_id: Uuid, owner: Uuid) -> Result<MediaFile, MediaRepositoryError>;

    /// All `uploaded` rows for a session, optionally restricted to one kind.
    async fn list_committed(
        &self,
        session_id: Uuid,
        kind: Option<MediaKind>,
    ) -> Result<Vec<MediaFile>, MediaRepositoryError>;

    /// Deletes a single media row owned by `owner`, returning its object key
    /// so the caller can purge the underlying object.
    async fn delete(&self, media_id: Uuid, owner: Uuid) -> Result<String, MediaRepositoryError>;
}
