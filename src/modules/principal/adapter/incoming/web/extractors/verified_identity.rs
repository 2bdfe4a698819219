use actix_web::{dev::Payload, Error as ActixError, FromRequest, HttpRequest};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::modules::principal::application::ports::outgoing::identity_verifier::IdentityVerifier;

pub use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;

/// Token-verification-only extractor: it never touches the database. The
/// get-or-create-on-first-request principal provisioning (spec §3
/// "Lifecycle: created on first authenticated request") happens inside each
/// use case's `execute`, which takes a `VerifiedIdentity` and resolves it
/// through `PrincipalRepository::get_or_create_by_subject`. This mirrors the
/// teacher's `AuthenticatedUser` extractor shape exactly (same synchronous
/// `Ready<Result<...>>` future, same header-parsing helper) while keeping the
/// extractor itself free of I/O.
impl FromRequest for VerifiedIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<actix_web::web::Data<Arc<dyn IdentityVerifier>>>() {
            Some(v) => v,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "identity verifier not configured",
                )))
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(actix_web::error::ErrorUnauthorized(
                    "missing or invalid authorization header",
                )))
            }
        };

        match verifier.verify(&token) {
            Ok(identity) => ready(Ok(identity)),
            Err(e) => ready(Err(actix_web::error::ErrorUnauthorized(e.to_string()))),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
