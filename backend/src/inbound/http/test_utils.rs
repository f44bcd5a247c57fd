//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::Utc;

use crate::domain::ports::{
    MockAccountService, MockDashboardQuery, MockSessionVerifier, MockUserProfileQuery,
};
use crate::domain::{EmailAddress, SessionClaims, UserId, default_session_ttl};

use super::configure_api;
use super::state::{HttpState, HttpStatePorts};

/// Mocked driving ports. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    /// Double for [`HttpState::accounts`].
    pub accounts: MockAccountService,
    /// Double for [`HttpState::sessions`].
    pub sessions: MockSessionVerifier,
    /// Double for [`HttpState::profiles`].
    pub profiles: MockUserProfileQuery,
    /// Double for [`HttpState::dashboard`].
    pub dashboard: MockDashboardQuery,
}

impl MockPorts {
    /// Wire the doubles into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            sessions: Arc::new(self.sessions),
            profiles: Arc::new(self.profiles),
            dashboard: Arc::new(self.dashboard),
        })
    }
}

/// Claims for `user_id` valid for the default session lifetime.
pub fn claims_for(user_id: UserId) -> SessionClaims {
    let issued_at = Utc::now();
    let email = match EmailAddress::new("ann@x.com") {
        Ok(email) => email,
        Err(err) => panic!("fixture email rejected: {err}"),
    };
    SessionClaims::new(user_id, email, issued_at, issued_at + default_session_ttl())
}

/// Application with the API routes mounted over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_api)
}
