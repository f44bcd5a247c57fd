//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing and verification run on Tokio's blocking pool. The request's
//! [`TraceId`] is carried across so errors raised there stay correlated.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TraceId};

/// Argon2 cost parameters.
///
/// Defaults follow the `argon2` crate: 19 MiB memory, two passes, one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Settings {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Number of lanes.
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Salted Argon2id password hasher.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Build a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when the parameters fall outside
    /// the ranges Argon2 accepts (for example memory below `8 * parallelism`).
    pub fn new(settings: Argon2Settings) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|err| PasswordHashError::hashing(format!("invalid argon2 parameters: {err}")))?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::in_scope(trace_id, work))
        .await
        .map_err(|err| PasswordHashError::worker(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let secret = Zeroizing::new(password.to_owned());
        let params = self.params.clone();
        let encoded = run_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(params)
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let candidate = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        let params = self.params.clone();
        run_blocking(move || {
            let parsed = PhcHash::new(&encoded)
                .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
            // Cost parameters are read from the stored hash, not from `params`.
            match Self::argon2(params).verify_password(candidate.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(PhcError::Password) => Ok(false),
                Err(err) => Err(PasswordHashError::hashing(err.to_string())),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(Argon2Settings {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("minimal parameters are valid")
    }

    #[rstest]
    #[tokio::test]
    async fn hash_then_verify_accepts_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("secret1").await.expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("secret1", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn verify_rejects_other_passwords(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("secret1").await.expect("hash");
        assert!(!hasher.verify("secret2", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret1").await.expect("hash");
        let second = hasher.hash("secret1").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("secret1", &PasswordHash::new("plaintext"))
            .await
            .expect_err("not a PHC string");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }

    #[rstest]
    fn invalid_parameters_are_rejected() {
        let result = Argon2PasswordHasher::new(Argon2Settings {
            memory_kib: 1,
            iterations: 1,
            parallelism: 4,
        });
        assert!(matches!(result, Err(PasswordHashError::Hashing { .. })));
    }
}
