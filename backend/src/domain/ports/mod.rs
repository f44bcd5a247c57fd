//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `PasswordHasher`, `SessionTokens`) are
//! implemented by outbound adapters. Driving ports (`AccountService`,
//! `SessionVerifier`, `UserProfileQuery`, `DashboardQuery`) are what inbound
//! adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod dashboard_query;
mod password_hasher;
mod session_tokens;
mod session_verifier;
mod user_profile_query;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
#[cfg(test)]
pub use session_verifier::MockSessionVerifier;
pub use session_verifier::SessionVerifier;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
