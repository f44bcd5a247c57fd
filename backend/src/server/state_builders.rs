//! Wiring of domain services and adapters into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use gatehouse::domain::ports::{SessionTokens, UserRepository};
use gatehouse::domain::{TokenSessionVerifier, UserAccountsService, UserProfileService};
use gatehouse::inbound::http::state::{HttpState, HttpStatePorts};
use gatehouse::outbound::memory::InMemoryUserRepository;
use gatehouse::outbound::persistence::DieselUserRepository;
use gatehouse::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};

use super::ServerConfig;

/// Build the shared HTTP state, choosing the repository by configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the Argon2 parameters are rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Argon2PasswordHasher::new(config.argon2)
        .map_err(|err| std::io::Error::other(format!("invalid argon2 settings: {err}")))?;
    let tokens: Arc<dyn SessionTokens> = Arc::new(
        JwtSessionTokens::new(&config.signing_secret, clock.clone()).with_ttl(config.token_ttl),
    );

    let state = match &config.db_pool {
        Some(pool) => wire_services(
            Arc::new(DieselUserRepository::new(pool.clone())),
            hasher,
            tokens,
            clock,
        ),
        None => {
            warn!("no database configured; accounts are kept in memory and lost on restart");
            wire_services(
                Arc::new(InMemoryUserRepository::default()),
                hasher,
                tokens,
                clock,
            )
        }
    };
    Ok(web::Data::new(state))
}

fn wire_services<R>(
    users: Arc<R>,
    hasher: Argon2PasswordHasher,
    tokens: Arc<dyn SessionTokens>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    R: UserRepository + 'static,
{
    let accounts = UserAccountsService::new(users.clone(), Arc::new(hasher), tokens.clone(), clock);
    let profiles = Arc::new(UserProfileService::new(users));

    HttpState::new(HttpStatePorts {
        accounts: Arc::new(accounts),
        sessions: Arc::new(TokenSessionVerifier::new(tokens)),
        profiles: profiles.clone(),
        dashboard: profiles,
    })
}
