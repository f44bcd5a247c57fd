//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use tracing::error;

use crate::domain::{Account, Error, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already owns the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Storage for user accounts.
///
/// Implementations must enforce email uniqueness atomically inside
/// [`UserRepository::insert`], so concurrent signups for one address leave
/// exactly one account behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account, failing with
    /// [`UserPersistenceError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, account: &Account) -> Result<(), UserPersistenceError>;

    /// Fetch an account, including its password hash, by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, UserPersistenceError>;

    /// Fetch the public view of a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}

impl From<UserPersistenceError> for Error {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Connection { message } => {
                error!(%message, "user repository connection failed");
                Error::internal(format!("user repository connection failed: {message}"))
            }
            UserPersistenceError::Query { message } => {
                error!(%message, "user repository query failed");
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::conflict("Email already registered")
            }
        }
    }
}
