//! Stand-in adapter for the "external black-box identity verifier" the spec
//! names but deliberately leaves unimplemented (spec §1, "identity token
//! verification (treated as a black-box `verify(token) -> {subject, email}`)").
//!
//! Reuses the teacher's JWT verification approach (`jwt/jwt_service.rs`)
//! rather than inventing a vendor SDK integration: the claims' `sub` becomes
//! the opaque `external_subject`, and `email` travels as a custom claim.
//! A production deployment swaps this adapter for a real identity provider
//! client behind the same `IdentityVerifier` trait; no other code changes.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::modules::principal::application::ports::outgoing::identity_verifier::{
    IdentityError, IdentityVerifier, VerifiedIdentity,
};

#[derive(Debug, Serialize, Deserialize)]
struct IdentityClaims {
    sub: String,
    email: Option<String>,
    exp: i64,
}

pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl IdentityVerifier for JwtIdentityVerifier {
    fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;

        let decoded = decode::<IdentityClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        Ok(VerifiedIdentity {
            subject: decoded.claims.sub,
            email: decoded.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(sub: &str, email: Option<&str>, secret: &str, expiry_secs: i64) -> String {
        let claims = IdentityClaims {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            exp: (Utc::now() + Duration::seconds(expiry_secs)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verifies_a_well_formed_token() {
        let verifier = JwtIdentityVerifier::new("test_secret");
        let token = token_for("user-123", Some("a@b.com"), "test_secret", 3600);

        let identity = verifier.verify(&token).unwrap();
        assert_eq!(identity.subject, "user-123");
        assert_eq!(identity.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn rejects_expired_token() {
        let verifier = JwtIdentityVerifier::new("test_secret");
        let token = token_for("user-123", None, "test_secret", -3600);

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = JwtIdentityVerifier::new("test_secret");
        let token = token_for("user-123", None, "other_secret", 3600);

        assert!(verifier.verify(&token).is_err());
    }
}
