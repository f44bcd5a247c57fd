//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::TimeDelta;
use gatehouse::domain::default_session_ttl;
use gatehouse::outbound::persistence::DbPool;
use gatehouse::outbound::security::Argon2Settings;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: TimeDelta,
    pub(crate) argon2: Argon2Settings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration with default token lifetime and hashing cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, signing_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            signing_secret,
            token_ttl: default_session_ttl(),
            argon2: Argon2Settings::default(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the user repository.
    ///
    /// Without one the server keeps accounts in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override how long issued session tokens stay valid.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: TimeDelta) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Override the password hashing cost.
    #[must_use]
    pub fn with_argon2(mut self, settings: Argon2Settings) -> Self {
        self.argon2 = settings;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
