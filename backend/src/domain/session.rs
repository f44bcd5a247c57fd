//! Session tokens and the claims they carry.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use super::user::{EmailAddress, User, UserId};

/// Default lifetime of an issued token, in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Default lifetime of an issued token.
#[must_use]
pub fn default_session_ttl() -> TimeDelta {
    TimeDelta::hours(DEFAULT_SESSION_TTL_HOURS)
}

/// Identity asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    user_id: UserId,
    email: EmailAddress,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Assemble claims from their parts.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        email: EmailAddress,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            email,
            issued_at,
            expires_at,
        }
    }

    /// Account the token was issued to.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Email address of the account at issue time.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Issue instant (`iat`).
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Expiry instant (`exp`).
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the claims are still valid at `now`. The expiry instant itself
    /// is already expired.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Opaque signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Encoded token as sent in the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

/// A freshly issued token alongside the claims it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    token: SessionToken,
    claims: SessionClaims,
}

impl IssuedSession {
    /// Pair a token with the claims it encodes.
    #[must_use]
    pub const fn new(token: SessionToken, claims: SessionClaims) -> Self {
        Self { token, claims }
    }

    /// Signed token to hand to the client.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Claims encoded in [`Self::token`].
    #[must_use]
    pub const fn claims(&self) -> &SessionClaims {
        &self.claims
    }
}

/// Result of a successful signup or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user: User,
    session: IssuedSession,
}

impl AuthenticatedUser {
    /// Pair an account with its new session.
    #[must_use]
    pub const fn new(user: User, session: IssuedSession) -> Self {
        Self { user, session }
    }

    /// Public view of the signed-in account.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Session issued for this sign-in.
    #[must_use]
    pub const fn session(&self) -> &IssuedSession {
        &self.session
    }
}
