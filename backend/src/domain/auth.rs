//! Authentication primitives: signup details and login credentials.
//!
//! Handlers hand raw strings to these constructors before talking to a port,
//! so payload parsing stays outside the domain while validation stays inside.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserName, UserValidationError};

/// Minimum password length, counted in Unicode scalar values.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Domain error returned when signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// At least one of name, email or password was missing or blank.
    MissingFields,
    /// Email was present but not a syntactically valid address.
    InvalidEmail,
    /// Name exceeded the accepted length.
    NameTooLong {
        /// Longest accepted name, in characters.
        max: usize,
    },
    /// Email exceeded the accepted length.
    EmailTooLong {
        /// Longest accepted email, in characters.
        max: usize,
    },
    /// Password was shorter than [`PASSWORD_MIN_CHARS`].
    PasswordTooShort {
        /// Shortest accepted password, in characters.
        min: usize,
    },
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required"),
            Self::InvalidEmail => write!(f, "Email must be a valid address"),
            Self::NameTooLong { max } => write!(f, "Name must be at most {max} characters"),
            Self::EmailTooLong { max } => write!(f, "Email must be at most {max} characters"),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for SignupValidationError {}

impl From<UserValidationError> for SignupValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::NameTooLong { max } => Self::NameTooLong { max },
            UserValidationError::EmailTooLong { max } => Self::EmailTooLong { max },
            UserValidationError::EmptyName | UserValidationError::EmptyEmail => {
                Self::MissingFields
            }
            UserValidationError::InvalidEmail
            | UserValidationError::EmptyId
            | UserValidationError::InvalidId => Self::InvalidEmail,
        }
    }
}

/// Validated registration request.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty; `email` is well formed.
/// - `password` has at least [`PASSWORD_MIN_CHARS`] characters and keeps
///   caller-provided whitespace.
///
/// # Examples
/// ```
/// use gatehouse::domain::SignupDetails;
///
/// let details = SignupDetails::try_from_parts("Ann", "ann@x.com", "secret1").unwrap();
/// assert_eq!(details.email().as_ref(), "ann@x.com");
/// assert!(SignupDetails::try_from_parts("Ann", "ann@x.com", "123").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Construct signup details from raw inputs.
    ///
    /// Presence of every field is checked before any format rule, so a
    /// request missing a field always reports [`SignupValidationError::MissingFields`].
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, SignupValidationError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(SignupValidationError::MissingFields);
        }

        let user_name = UserName::new(name)?;
        let email_address = EmailAddress::new(email)?;

        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(SignupValidationError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }

        Ok(Self {
            name: user_name,
            email: email_address,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Validated email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password, wiped from memory when dropped.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignupDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDetails")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email or password was missing.
    MissingFields,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Email and password are required"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Login credentials used by the account service.
///
/// The email is only trimmed, never format-checked: a malformed address
/// simply fails lookup and yields the same error as a wrong password.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() || password.is_empty() {
            return Err(LoginValidationError::MissingFields);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string used for account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "ann@x.com", "secret1")]
    #[case("   ", "ann@x.com", "secret1")]
    #[case("Ann", "", "secret1")]
    #[case("Ann", "ann@x.com", "")]
    #[case("", "not-an-email", "1")]
    fn signup_requires_every_field(#[case] name: &str, #[case] email: &str, #[case] password: &str) {
        let err = SignupDetails::try_from_parts(name, email, password)
            .expect_err("missing fields must fail");
        assert_eq!(err, SignupValidationError::MissingFields);
        assert_eq!(err.to_string(), "All fields are required");
    }

    #[rstest]
    #[case("12345")]
    #[case("äöü12")]
    fn signup_rejects_short_passwords(#[case] password: &str) {
        let err = SignupDetails::try_from_parts("Ann", "ann@x.com", password)
            .expect_err("short password must fail");
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[rstest]
    fn signup_counts_characters_not_bytes() {
        let details = SignupDetails::try_from_parts("Ann", "ann@x.com", "äöüäöü")
            .expect("six characters is enough");
        assert_eq!(details.password(), "äöüäöü");
    }

    #[rstest]
    fn signup_rejects_malformed_email() {
        let err = SignupDetails::try_from_parts("Ann", "ann@", "secret1")
            .expect_err("malformed email must fail");
        assert_eq!(err, SignupValidationError::InvalidEmail);
    }

    #[rstest]
    fn signup_trims_name_and_email() {
        let details = SignupDetails::try_from_parts(" Ann ", " ann@x.com ", " secret ")
            .expect("valid inputs");
        assert_eq!(details.name().as_ref(), "Ann");
        assert_eq!(details.email().as_ref(), "ann@x.com");
        assert_eq!(details.password(), " secret ");
    }

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("ann@x.com", "")]
    fn login_requires_email_and_password(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err.to_string(), "Email and password are required");
    }

    #[rstest]
    #[case("  ann@x.com  ", "secret")]
    #[case("not-an-email", "correct horse battery staple")]
    fn login_trims_email_without_format_check(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn debug_output_hides_passwords() {
        let details = SignupDetails::try_from_parts("Ann", "ann@x.com", "secret1").expect("valid");
        let creds = LoginCredentials::try_from_parts("ann@x.com", "secret1").expect("valid");
        assert!(!format!("{details:?}").contains("secret1"));
        assert!(!format!("{creds:?}").contains("secret1"));
    }
}
