//! Mutex-guarded `UserRepository` kept entirely in memory.
//!
//! Data is lost on restart. Uniqueness is checked and the row written under
//! one lock, so concurrent inserts for the same email cannot both succeed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Account, User, UserId};

#[derive(Default)]
struct Accounts {
    by_id: HashMap<UserId, Account>,
    ids_by_email: HashMap<String, UserId>,
}

/// Volatile [`UserRepository`] implementation.
///
/// # Examples
/// ```
/// use gatehouse::outbound::memory::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::default();
/// assert_eq!(repo.len().ok(), Some(0));
/// ```
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Accounts>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Accounts>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store is poisoned"))
    }

    /// Number of stored accounts.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::Connection`] if the store is poisoned.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        self.lock().map(|accounts| accounts.by_id.len())
    }

    /// Whether no accounts are stored.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::Connection`] if the store is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        self.len().map(|count| count == 0)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &Account) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        let email = account.user().email().as_ref();
        if accounts.ids_by_email.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email));
        }
        let id = *account.user().id();
        if accounts.by_id.contains_key(&id) {
            return Err(UserPersistenceError::query(format!("user id {id} already exists")));
        }
        accounts.ids_by_email.insert(email.to_owned(), id);
        accounts.by_id.insert(id, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .ids_by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts.by_id.get(id).map(|account| account.user().clone()))
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let accounts = self.lock()?;
        u64::try_from(accounts.by_id.len())
            .map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}
