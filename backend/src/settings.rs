//! Application settings loaded via OrthoConfig.
//!
//! Values merge command-line flags, `GATEHOUSE_*` environment variables and
//! configuration files. Every key is optional; accessors apply defaults.
#![expect(
    missing_docs,
    reason = "the OrthoConfig derive emits undocumented CLI companion items"
)]

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_SESSION_TTL_HOURS;
use crate::outbound::persistence::{DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, PoolConfig};
use crate::outbound::security::Argon2Settings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Runtime configuration for the gatehouse server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEHOUSE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Absent means an in-memory store.
    pub database_url: Option<String>,
    /// HMAC secret used to sign session tokens.
    pub jwt_secret: Option<String>,
    /// Session token lifetime in hours.
    pub token_ttl_hours: Option<u32>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Minimum idle database connections.
    pub pool_min_idle: Option<u32>,
    /// Argon2 memory cost in KiB.
    pub argon2_memory_kib: Option<u32>,
    /// Argon2 iteration count.
    pub argon2_iterations: Option<u32>,
    /// Argon2 lane count.
    pub argon2_parallelism: Option<u32>,
}

/// Configuration value that could not be interpreted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    /// `bind_addr` did not parse as `host:port`.
    #[error("bind_addr `{value}` is not a socket address")]
    InvalidBindAddr {
        /// The rejected value.
        value: String,
    },
    /// `token_ttl_hours` was zero.
    #[error("token_ttl_hours must be greater than zero")]
    ZeroTokenTtl,
}

impl AppSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:5000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
            })
    }

    /// Database URL, if persistence is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Token signing secret, if configured and non-blank.
    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }

    /// Session token lifetime, defaulting to 24 hours.
    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let hours = self
            .token_ttl_hours
            .map_or(DEFAULT_SESSION_TTL_HOURS, i64::from);
        if hours == 0 {
            return Err(SettingsError::ZeroTokenTtl);
        }
        Ok(TimeDelta::hours(hours))
    }

    /// Pool configuration for `url` using the configured sizes.
    pub fn pool_config(&self, url: &str) -> PoolConfig {
        PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
    }

    /// Argon2 cost parameters, falling back to the library defaults.
    pub fn argon2(&self) -> Argon2Settings {
        let defaults = Argon2Settings::default();
        Argon2Settings {
            memory_kib: self.argon2_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.argon2_iterations.unwrap_or(defaults.iterations),
            parallelism: self.argon2_parallelism.unwrap_or(defaults.parallelism),
        }
    }
}
