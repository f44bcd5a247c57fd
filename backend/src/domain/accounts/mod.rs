//! Account registration and authentication service.
//!
//! Implements the [`AccountService`] driving port on top of the user
//! repository, password hasher and session token ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AccountService, PasswordHashError, PasswordHasher, SessionTokens, UserRepository,
};
use crate::domain::{
    Account, AuthenticatedUser, Error, LoginCredentials, SignupDetails, User, UserId,
};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
/// Message returned when signing up with a registered email.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email already registered";

/// Account service implementing the signup and login use-cases.
#[derive(Clone)]
pub struct UserAccountsService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<dyn SessionTokens>,
    clock: Arc<dyn Clock>,
}

impl<R, H> UserAccountsService<R, H> {
    /// Create a new service over the given ports.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use gatehouse::domain::UserAccountsService;
    /// use gatehouse::outbound::memory::InMemoryUserRepository;
    /// use gatehouse::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let tokens = Arc::new(JwtSessionTokens::new(b"secret", clock.clone()));
    /// let _service = UserAccountsService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     tokens,
    ///     clock,
    /// );
    /// ```
    pub fn new(
        users: Arc<R>,
        hasher: Arc<H>,
        tokens: Arc<dyn SessionTokens>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R, H> UserAccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    fn invalid_credentials() -> Error {
        Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
    }

    fn map_hash_error(err: PasswordHashError) -> Error {
        error!(error = %err, "password hashing failed");
        Error::internal(format!("password hashing failed: {err}"))
    }

    fn issue_session(&self, user: User) -> Result<AuthenticatedUser, Error> {
        let session = self.tokens.issue(user.id(), user.email()).map_err(|err| {
            error!(error = %err, user_id = %user.id(), "failed to issue session token");
            Error::internal(format!("failed to issue session token: {err}"))
        })?;
        Ok(AuthenticatedUser::new(user, session))
    }
}

#[async_trait]
impl<R, H> AccountService for UserAccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn signup(&self, details: SignupDetails) -> Result<AuthenticatedUser, Error> {
        if self
            .users
            .find_by_email(details.email().as_ref())
            .await?
            .is_some()
        {
            debug!("signup rejected: email already registered");
            return Err(Error::conflict(EMAIL_TAKEN_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(Self::map_hash_error)?;

        let user = User::new(
            UserId::random(),
            details.name().clone(),
            details.email().clone(),
            self.clock.utc(),
        );
        // The repository enforces uniqueness again, covering concurrent signups.
        self.users
            .insert(&Account::new(user.clone(), password_hash))
            .await?;

        info!(user_id = %user.id(), "user registered");
        self.issue_session(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let Some(account) = self.users.find_by_email(credentials.email()).await? else {
            // Spend the same hashing effort as a real comparison; the hash
            // itself is discarded.
            let _unused = self.hasher.hash(credentials.password()).await;
            debug!("login rejected: unknown email");
            return Err(Self::invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(Self::map_hash_error)?;
        if !matches {
            debug!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(Self::invalid_credentials());
        }

        info!(user_id = %account.user().id(), "user logged in");
        self.issue_session(account.into_user())
    }
}

#[cfg(test)]
mod tests;
