use std::fmt;

/// Black-box external identity check (spec §1: "treated as a black-box
/// `verify(token) -> {subject, email}`"). The core never issues or owns
/// identity tokens; it only indexes principals by whatever stable subject
/// string the verifier hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub enum IdentityError {
    MissingToken,
    InvalidToken(String),
    Unavailable(String),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::MissingToken => write!(f, "missing or malformed authorization header"),
            IdentityError::InvalidToken(reason) => write!(f, "invalid token: {reason}"),
            IdentityError::Unavailable(reason) => {
                write!(f, "identity verifier unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for IdentityError {}

pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;
}
