//! Test utilities for the gatehouse crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::UserRepository;
use crate::domain::{TokenSessionVerifier, UserAccountsService, UserProfileService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::security::{Argon2PasswordHasher, Argon2Settings, JwtSessionTokens};

/// Signing secret used by test harnesses.
pub const TEST_JWT_SECRET: &[u8] = b"gatehouse-test-secret";

/// Clock whose current time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        self.advance(TimeDelta::seconds(seconds));
    }

    /// Jump the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used as "now" by default in harnesses.
pub fn fixture_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).single() {
        Some(now) => now,
        None => panic!("fixture timestamp is valid"),
    }
}

/// Argon2id hasher with the smallest legal cost, for fast tests.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    let settings = Argon2Settings {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };
    match Argon2PasswordHasher::new(settings) {
        Ok(hasher) => hasher,
        Err(err) => panic!("minimal argon2 parameters rejected: {err}"),
    }
}

/// Session token adapter signing with [`TEST_JWT_SECRET`] on `clock`.
pub fn test_session_tokens(clock: Arc<MutableClock>) -> JwtSessionTokens {
    JwtSessionTokens::new(TEST_JWT_SECRET, clock)
}

/// Application state wired over an arbitrary user repository.
///
/// Tokens are signed with [`TEST_JWT_SECRET`] so a test can mint its own
/// with [`test_session_tokens`] on the same clock.
pub fn wired_state<R>(users: Arc<R>, clock: Arc<MutableClock>) -> HttpState
where
    R: UserRepository + 'static,
{
    let tokens = Arc::new(test_session_tokens(clock.clone()));
    let accounts = UserAccountsService::new(
        users.clone(),
        Arc::new(fast_password_hasher()),
        tokens.clone(),
        clock,
    );
    let profiles = Arc::new(UserProfileService::new(users));

    HttpState::new(HttpStatePorts {
        accounts: Arc::new(accounts),
        sessions: Arc::new(TokenSessionVerifier::new(tokens)),
        profiles: profiles.clone(),
        dashboard: profiles,
    })
}

/// Fully wired in-memory application state with a controllable clock.
///
/// # Examples
/// ```
/// use gatehouse::test_support::InMemoryHarness;
///
/// let harness = InMemoryHarness::new();
/// assert_eq!(harness.users.is_empty().ok(), Some(true));
/// let _state = harness.state.clone();
/// ```
pub struct InMemoryHarness {
    /// Handler state to register with `App::app_data`.
    pub state: HttpState,
    /// Store behind [`Self::state`], for direct inspection.
    pub users: Arc<InMemoryUserRepository>,
    /// Clock shared by token issuing and verification.
    pub clock: Arc<MutableClock>,
}

impl InMemoryHarness {
    /// Harness starting at [`fixture_now`].
    pub fn new() -> Self {
        Self::starting_at(fixture_now())
    }

    /// Harness whose clock starts at `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(MutableClock::new(now));
        let users = Arc::new(InMemoryUserRepository::default());
        let state = wired_state(users.clone(), clock.clone());

        Self {
            state,
            users,
            clock,
        }
    }
}

impl Default for InMemoryHarness {
    fn default() -> Self {
        Self::new()
    }
}
