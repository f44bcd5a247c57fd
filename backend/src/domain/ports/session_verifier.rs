//! Driving port for authenticating bearer tokens on protected requests.

use crate::domain::{Error, SessionClaims};

/// Resolve a raw bearer token into verified claims.
#[cfg_attr(test, mockall::automock)]
pub trait SessionVerifier: Send + Sync {
    /// Verify `token`, failing with [`crate::domain::ErrorCode::Forbidden`]
    /// when it is malformed, forged or expired.
    fn verify(&self, token: &str) -> Result<SessionClaims, Error>;
}
