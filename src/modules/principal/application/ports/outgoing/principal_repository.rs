use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::principal::application::domain::entities::Principal;

/// Starting balance granted on first provisioning, mirroring
/// `original_source/app/auth/dependencies.py`'s trial-credit grant.
pub const TRIAL_CREDITS: i32 = 3;

#[derive(Debug, Error)]
pub enum PrincipalRepositoryError {
    #[error("database error: {0}")]
    Database(String),
    #[error("principal not found")]
    NotFound,
}

#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Looks up a principal by its external identity handle, creating one
    /// with `TRIAL_CREDITS` if this is the first time this subject is seen.
    async fn get_or_create_by_subject(
        &self,
        external_subject: &str,
        email: Option<&str>,
    ) -> Result<Principal, PrincipalRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Principal, PrincipalRepositoryError>;

    async fn set_push_token(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<(), PrincipalRepositoryError>;

    async fn set_preferred_language(
        &self,
        id: Uuid,
        language: &str,
    ) -> Result<(), PrincipalRepositoryError>;

    async fn set_payment_customer_handle(
        &self,
        id: Uuid,
        handle: &str,
    ) -> Result<(), PrincipalRepositoryError>;
}
