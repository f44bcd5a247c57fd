//! Bearer token extraction for protected endpoints.
//!
//! Handlers take a [`BearerSession`] argument; extraction fails before the
//! handler body runs when the token is missing (401) or rejected (403).

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};

use crate::domain::{Error, SessionClaims, UserId};

use super::state::HttpState;

/// Message returned when no bearer token accompanies a protected request.
pub const ACCESS_TOKEN_REQUIRED_MESSAGE: &str = "Access token required";

/// Verified identity of the caller.
#[derive(Debug, Clone)]
pub struct BearerSession(SessionClaims);

impl BearerSession {
    /// Account the bearer token was issued to.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        self.0.user_id()
    }

    /// Full verified claims.
    #[must_use]
    pub const fn claims(&self) -> &SessionClaims {
        &self.0
    }

    fn extract(req: &HttpRequest) -> Result<Self, Error> {
        let token = bearer_token(req).ok_or_else(|| Error::unauthorized(ACCESS_TOKEN_REQUIRED_MESSAGE))?;
        let state = req
            .app_data::<web::Data<HttpState>>()
            .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
        state.sessions.verify(token).map(Self)
    }
}

/// Token from an `Authorization: Bearer <token>` header, if present.
///
/// Other schemes, and a bearer scheme with no token, count as absent.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequest for BearerSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}
