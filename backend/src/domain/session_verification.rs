//! Bearer token verification for protected requests.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{SessionTokens, SessionVerifier};
use crate::domain::{Error, SessionClaims};

/// Message returned for any rejected token.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// [`SessionVerifier`] backed by a [`SessionTokens`] adapter.
#[derive(Clone)]
pub struct TokenSessionVerifier {
    tokens: Arc<dyn SessionTokens>,
}

impl TokenSessionVerifier {
    /// Create a verifier delegating to `tokens`.
    #[must_use]
    pub fn new(tokens: Arc<dyn SessionTokens>) -> Self {
        Self { tokens }
    }
}

impl SessionVerifier for TokenSessionVerifier {
    fn verify(&self, token: &str) -> Result<SessionClaims, Error> {
        self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            Error::forbidden(INVALID_TOKEN_MESSAGE)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockSessionTokens, SessionTokenError};
    use crate::domain::{default_session_ttl, EmailAddress, ErrorCode, UserId};
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[case(SessionTokenError::expired())]
    #[case(SessionTokenError::invalid("bad signature"))]
    fn rejected_tokens_map_to_forbidden(#[case] failure: SessionTokenError) {
        let mut tokens = MockSessionTokens::new();
        tokens
            .expect_verify()
            .return_once(move |_| Err(failure));
        let verifier = TokenSessionVerifier::new(Arc::new(tokens));

        let err = verifier.verify("token").expect_err("token rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), INVALID_TOKEN_MESSAGE);
    }

    #[rstest]
    fn valid_tokens_yield_claims() {
        let user_id = UserId::random();
        let issued_at = Utc::now();
        let claims = SessionClaims::new(
            user_id,
            EmailAddress::new("ann@x.com").expect("email"),
            issued_at,
            issued_at + default_session_ttl(),
        );
        let expected = claims.clone();
        let mut tokens = MockSessionTokens::new();
        tokens
            .expect_verify()
            .withf(|token| token == "good")
            .return_once(move |_| Ok(claims));
        let verifier = TokenSessionVerifier::new(Arc::new(tokens));

        assert_eq!(verifier.verify("good").expect("valid token"), expected);
    }
}
