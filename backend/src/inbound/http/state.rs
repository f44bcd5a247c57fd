//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on
//! driving ports, so they can be tested with doubles instead of I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, DashboardQuery, SessionVerifier, UserProfileQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Signup and login.
    pub accounts: Arc<dyn AccountService>,
    /// Bearer token verification.
    pub sessions: Arc<dyn SessionVerifier>,
    /// Profile lookup for the signed-in user.
    pub profiles: Arc<dyn UserProfileQuery>,
    /// Dashboard summary.
    pub dashboard: Arc<dyn DashboardQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login.
    pub accounts: Arc<dyn AccountService>,
    /// Bearer token verification.
    pub sessions: Arc<dyn SessionVerifier>,
    /// Profile lookup for the signed-in user.
    pub profiles: Arc<dyn UserProfileQuery>,
    /// Dashboard summary.
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Construct state from the port bundle.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            sessions,
            profiles,
            dashboard,
        } = ports;
        Self {
            accounts,
            sessions,
            profiles,
            dashboard,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
