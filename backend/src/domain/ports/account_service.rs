//! Driving port for signup and login.
//!
//! Inbound adapters call this port to register or authenticate users without
//! knowing how credentials are hashed, stored or signed.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, SignupDetails};

/// Domain use-case port for account registration and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user and issue a session for them.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the email is
    /// already registered.
    async fn signup(&self, details: SignupDetails) -> Result<AuthenticatedUser, Error>;

    /// Authenticate credentials and issue a session.
    ///
    /// An unknown email and a wrong password produce the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error>;
}
