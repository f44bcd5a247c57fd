//! Tests for the account service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockSessionTokens, MockUserRepository, SessionTokenError,
    UserPersistenceError,
};
use crate::domain::{
    default_session_ttl, EmailAddress, ErrorCode, IssuedSession, PasswordHash, SessionClaims,
    SessionToken, UserName,
};
use crate::test_support::MutableClock;

const STORED_HASH: &str = "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA";

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn stored_account(created_at: DateTime<Utc>) -> Account {
    let user = User::new(
        UserId::random(),
        UserName::new("Ann").expect("name"),
        EmailAddress::new("ann@x.com").expect("email"),
        created_at,
    );
    Account::new(user, PasswordHash::new(STORED_HASH))
}

fn signing_tokens(times: usize) -> MockSessionTokens {
    let mut tokens = MockSessionTokens::new();
    tokens.expect_issue().times(times).returning(|user_id, email| {
        let issued_at = Utc::now();
        let claims = SessionClaims::new(
            *user_id,
            email.clone(),
            issued_at,
            issued_at + default_session_ttl(),
        );
        Ok(IssuedSession::new(SessionToken::new("signed"), claims))
    });
    tokens
}

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockSessionTokens,
    now: DateTime<Utc>,
) -> UserAccountsService<MockUserRepository, MockPasswordHasher> {
    UserAccountsService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(tokens),
        Arc::new(MutableClock::new(now)),
    )
}

fn signup_details() -> SignupDetails {
    SignupDetails::try_from_parts("Ann", "ann@x.com", "secret1").expect("valid details")
}

#[rstest]
#[tokio::test]
async fn signup_hashes_password_and_stores_account(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .returning(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account| {
            account.user().email().as_ref() == "ann@x.com"
                && account.password_hash().as_str() == STORED_HASH
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password == "secret1")
        .times(1)
        .returning(|_| Ok(PasswordHash::new(STORED_HASH)));

    let service = make_service(users, hasher, signing_tokens(1), now);
    let outcome = service.signup(signup_details()).await.expect("signup succeeds");

    assert_eq!(outcome.user().name().as_ref(), "Ann");
    assert_eq!(outcome.user().created_at(), now);
    assert_eq!(outcome.session().claims().user_id(), outcome.user().id());
    assert_eq!(outcome.session().token().as_str(), "signed");
}

#[rstest]
#[tokio::test]
async fn signup_rejects_registered_email_without_hashing(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .returning(move |_| Ok(Some(stored_account(now))));
    users.expect_insert().never();

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let service = make_service(users, hasher, signing_tokens(0), now);
    let err = service
        .signup(signup_details())
        .await
        .expect_err("duplicate email");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), EMAIL_TAKEN_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn signup_maps_racing_duplicate_insert_to_conflict(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_insert()
        .returning(|account| Err(UserPersistenceError::duplicate_email(account.user().email().as_ref())));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::new(STORED_HASH)));

    let service = make_service(users, hasher, signing_tokens(0), now);
    let err = service
        .signup(signup_details())
        .await
        .expect_err("lost the race");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn signup_collapses_repository_connection_failure_to_internal(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Err(UserPersistenceError::connection("refused")));

    let service = make_service(users, MockPasswordHasher::new(), signing_tokens(0), now);
    let err = service
        .signup(signup_details())
        .await
        .expect_err("repository down");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn signup_surfaces_token_failures_as_internal(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_insert().returning(|_| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::new(STORED_HASH)));
    let mut tokens = MockSessionTokens::new();
    tokens
        .expect_issue()
        .returning(|_, _| Err(SessionTokenError::signing("bad key")));

    let service = make_service(users, hasher, tokens, now);
    let err = service
        .signup(signup_details())
        .await
        .expect_err("signing failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn login_issues_session_for_matching_password(now: DateTime<Utc>) {
    let account = stored_account(now);
    let expected_id = *account.user().id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|email| email == "ann@x.com")
        .returning(move |_| Ok(Some(account.clone())));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, hash| password == "secret1" && hash.as_str() == STORED_HASH)
        .times(1)
        .returning(|_, _| Ok(true));

    let service = make_service(users, hasher, signing_tokens(1), now);
    let creds = LoginCredentials::try_from_parts(" ann@x.com ", "secret1").expect("creds");
    let outcome = service.login(&creds).await.expect("login succeeds");

    assert_eq!(outcome.user().id(), &expected_id);
}

#[rstest]
#[tokio::test]
async fn login_failures_are_indistinguishable(now: DateTime<Utc>) {
    let account = stored_account(now);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |email| Ok((email == "ann@x.com").then(|| account.clone())));

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(false));
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordHash::new(STORED_HASH)));

    let service = make_service(users, hasher, signing_tokens(0), now);
    let wrong_password = LoginCredentials::try_from_parts("ann@x.com", "nope").expect("creds");
    let unknown_email = LoginCredentials::try_from_parts("bob@x.com", "secret1").expect("creds");

    let first = service.login(&wrong_password).await.expect_err("wrong password");
    let second = service.login(&unknown_email).await.expect_err("unknown email");

    assert_eq!(first.code(), ErrorCode::Unauthorized);
    assert_eq!(first.code(), second.code());
    assert_eq!(first.message(), INVALID_CREDENTIALS_MESSAGE);
    assert_eq!(first.message(), second.message());
}

#[rstest]
#[tokio::test]
async fn login_treats_malformed_stored_hash_as_internal(now: DateTime<Utc>) {
    let account = stored_account(now);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(account.clone())));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(|_, _| Err(PasswordHashError::malformed_hash("not phc")));

    let service = make_service(users, hasher, signing_tokens(0), now);
    let creds = LoginCredentials::try_from_parts("ann@x.com", "secret1").expect("creds");
    let err = service.login(&creds).await.expect_err("corrupt hash");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
