//! Tests for user value types.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_round_trips_through_string() {
    let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(String::from(id), raw);
}

#[rstest]
#[case("   ", UserValidationError::EmptyName)]
#[case("", UserValidationError::EmptyName)]
fn name_rejects_blank_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserName::new(raw), Err(expected));
}

#[rstest]
fn name_is_trimmed() {
    let name = UserName::new("  Ann  ").expect("valid name");
    assert_eq!(name.as_ref(), "Ann");
}

#[rstest]
fn name_enforces_maximum_length() {
    let long = "a".repeat(NAME_MAX + 1);
    assert_eq!(
        UserName::new(long),
        Err(UserValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
#[case("ann@x.com")]
#[case("first.last+tag@sub.example.org")]
#[case("ANN@X.COM")]
fn email_accepts_common_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("ann", UserValidationError::InvalidEmail)]
#[case("ann@", UserValidationError::InvalidEmail)]
#[case("ann@x", UserValidationError::InvalidEmail)]
#[case("ann@x.", UserValidationError::InvalidEmail)]
#[case("an n@x.com", UserValidationError::InvalidEmail)]
#[case("ann@@x.com", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn email_preserves_case_after_trimming() {
    let email = EmailAddress::new("  Ann@X.com\t").expect("valid email");
    assert_eq!(email.as_ref(), "Ann@X.com");
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA");
    let rendered = format!("{hash:?}");
    assert!(!rendered.contains("argon2id"));
}
