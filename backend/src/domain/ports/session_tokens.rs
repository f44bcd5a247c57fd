//! Port for issuing and verifying signed session tokens.

use crate::domain::{EmailAddress, IssuedSession, SessionClaims, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenError {
        /// The token's expiry has passed.
        Expired => "session token has expired",
        /// Signature, structure or claims are invalid.
        Invalid { message: String } => "session token is invalid: {message}",
        /// A token could not be signed.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

/// Issue and verify self-contained bearer tokens.
///
/// Verification needs no storage lookup: a token is valid while its
/// signature checks out and its expiry lies in the future.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Sign a token asserting `user_id` and `email`.
    fn issue(&self, user_id: &UserId, email: &EmailAddress)
    -> Result<IssuedSession, SessionTokenError>;

    /// Validate a raw token and return the claims it carries.
    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError>;
}
