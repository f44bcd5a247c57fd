//! Domain primitives, ports and services.
//!
//! Purpose: hold the account model and the signup, login, session and
//! dashboard use-cases without depending on HTTP or database crates.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Account and their value types.
//! - SignupDetails / LoginCredentials: validated request inputs.
//! - SessionClaims / IssuedSession: token issuing and verification results.
//! - UserAccountsService, TokenSessionVerifier, UserProfileService: the
//!   services behind the driving ports in [`ports`].

pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod ports;
pub mod profile_service;
pub mod session;
pub mod session_verification;
pub mod trace_id;
pub mod user;

pub use self::accounts::{EMAIL_TAKEN_MESSAGE, INVALID_CREDENTIALS_MESSAGE, UserAccountsService};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_CHARS, SignupDetails,
    SignupValidationError,
};
pub use self::dashboard::{ActivityEntry, DashboardSummary};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile_service::UserProfileService;
pub use self::session::{
    AuthenticatedUser, DEFAULT_SESSION_TTL_HOURS, IssuedSession, SessionClaims, SessionToken,
    default_session_ttl,
};
pub use self::session_verification::{INVALID_TOKEN_MESSAGE, TokenSessionVerifier};
pub use self::trace_id::TraceId;
pub use self::user::{
    Account, EmailAddress, PasswordHash, User, UserId, UserName, UserValidationError,
};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
