//! HS256 JWT implementation of the [`SessionTokens`] port.
//!
//! Tokens carry `id`, `email`, `iat` and `exp`. Expiry is checked against the
//! injected [`Clock`] rather than the system time, so tests can move time.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{
    EmailAddress, IssuedSession, SessionClaims, SessionToken, UserId, default_session_ttl,
};

#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    id: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokens {
    /// Create a signer using `secret` and the default 24 hour lifetime.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let key = Zeroizing::new(secret.to_vec());
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against `clock` in `verify`.
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
            validation,
            ttl: default_session_ttl(),
            clock,
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    fn timestamp(seconds: i64, claim: &str) -> Result<DateTime<Utc>, SessionTokenError> {
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| SessionTokenError::invalid(format!("{claim} is out of range")))
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(
        &self,
        user_id: &UserId,
        email: &EmailAddress,
    ) -> Result<IssuedSession, SessionTokenError> {
        // JWT timestamps have whole-second precision.
        let issued_at = Self::timestamp(self.clock.utc().timestamp(), "iat")
            .map_err(|err| SessionTokenError::signing(err.to_string()))?;
        let expires_at = issued_at + self.ttl;
        let claims = JwtClaims {
            id: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| SessionTokenError::signing(err.to_string()))?;

        Ok(IssuedSession::new(
            SessionToken::new(token),
            SessionClaims::new(*user_id, email.clone(), issued_at, expires_at),
        ))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let decoded = decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| SessionTokenError::invalid(err.to_string()))?;
        let JwtClaims { id, email, iat, exp } = decoded.claims;

        let claims = SessionClaims::new(
            UserId::new(&id).map_err(|err| SessionTokenError::invalid(err.to_string()))?,
            EmailAddress::new(&email).map_err(|err| SessionTokenError::invalid(err.to_string()))?,
            Self::timestamp(iat, "iat")?,
            Self::timestamp(exp, "exp")?,
        );

        if !claims.is_valid_at(self.clock.utc()) {
            return Err(SessionTokenError::expired());
        }
        Ok(claims)
    }
}
