use crate::modules::principal::application::domain::entities::Principal;
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::{
    PrincipalRepository, PrincipalRepositoryError,
};

/// Every use case across every module that needs an owning principal calls
/// this first, rather than the extractor doing it — keeps the `FromRequest`
/// impl free of database access (see `verified_identity.rs`).
pub async fn resolve_principal(
    repo: &dyn PrincipalRepository,
    identity: &VerifiedIdentity,
) -> Result<Principal, PrincipalRepositoryError> {
    repo.get_or_create_by_subject(&identity.subject, identity.email.as_deref())
        .await
}
