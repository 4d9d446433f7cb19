//! User account data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed length for a full name.
pub const FULL_NAME_MIN: usize = 3;
/// Maximum allowed length for a full name.
pub const FULL_NAME_MAX: usize = 150;
/// Minimum allowed length for a phone number.
pub const PHONE_MIN: usize = 7;
/// Maximum allowed length for a phone number.
pub const PHONE_MAX: usize = 20;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 6;
/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 100;

/// Validation errors returned by the account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    FullNameTooShort { min: usize },
    FullNameTooLong { max: usize },
    InvalidEmail,
    PhoneTooShort { min: usize },
    PhoneTooLong { max: usize },
    PasswordTooShort { min: usize },
    PasswordTooLong { max: usize },
    PasswordMismatch,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullNameTooShort { min } => {
                write!(f, "full name must be at least {min} characters")
            }
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::PhoneTooShort { min } => {
                write!(f, "phone number must be at least {min} characters")
            }
            Self::PhoneTooLong { max } => {
                write!(f, "phone number must be at most {max} characters")
            }
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One @, no whitespace, and a dotted domain. Uniqueness is the
        // store's concern, not format validation's.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated email address used as the login key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered account.
///
/// `password_hash` holds the hasher's opaque PHC string; the raw password
/// never reaches this type and the hash never leaves the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: EmailAddress,
    pub phone_number: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Outward-facing account summary (no password hash).
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: UserId,
    pub full_name: String,
    pub email: EmailAddress,
    pub phone_number: String,
}

impl From<User> for UserSummary {
    fn from(value: User) -> Self {
        let User {
            id,
            full_name,
            email,
            phone_number,
            password_hash: _,
            created_at: _,
        } = value;
        Self {
            id,
            full_name,
            email,
            phone_number,
        }
    }
}

fn check_length(
    len: usize,
    min: usize,
    max: usize,
    too_short: UserValidationError,
    too_long: UserValidationError,
) -> Result<(), UserValidationError> {
    if len < min {
        return Err(too_short);
    }
    if len > max {
        return Err(too_long);
    }
    Ok(())
}

/// Validated registration input.
///
/// The password/confirmation comparison happens here, before any store or
/// hasher access, so a mismatch never touches persistence.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: EmailAddress,
    pub phone_number: String,
    password: String,
}

impl Registration {
    /// Validate and construct a registration.
    pub fn try_new(
        full_name: impl Into<String>,
        email: &str,
        phone_number: impl Into<String>,
        password: impl Into<String>,
        confirm_password: &str,
    ) -> Result<Self, UserValidationError> {
        let full_name = full_name.into();
        check_length(
            full_name.chars().count(),
            FULL_NAME_MIN,
            FULL_NAME_MAX,
            UserValidationError::FullNameTooShort { min: FULL_NAME_MIN },
            UserValidationError::FullNameTooLong { max: FULL_NAME_MAX },
        )?;

        let email = EmailAddress::new(email)?;

        let phone_number = phone_number.into();
        check_length(
            phone_number.chars().count(),
            PHONE_MIN,
            PHONE_MAX,
            UserValidationError::PhoneTooShort { min: PHONE_MIN },
            UserValidationError::PhoneTooLong { max: PHONE_MAX },
        )?;

        let password = password.into();
        check_length(
            password.chars().count(),
            PASSWORD_MIN,
            PASSWORD_MAX,
            UserValidationError::PasswordTooShort { min: PASSWORD_MIN },
            UserValidationError::PasswordTooLong { max: PASSWORD_MAX },
        )?;
        if password != confirm_password {
            return Err(UserValidationError::PasswordMismatch);
        }

        Ok(Self {
            full_name,
            email,
            phone_number,
            password,
        })
    }

    /// The raw password, exposed only to the hashing step.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login input.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct login credentials.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, UserValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: password.to_owned(),
        })
    }

    /// Login key.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The raw password, exposed only to the verify step.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn registration(
        full_name: &str,
        email: &str,
        phone: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Registration, UserValidationError> {
        Registration::try_new(full_name, email, phone, password, confirm)
    }

    #[rstest]
    fn accepts_a_well_formed_registration() {
        let reg = registration(
            "Ada Lovelace",
            "ada@example.org",
            "07000000000",
            "s3cret-pass",
            "s3cret-pass",
        )
        .expect("valid registration");
        assert_eq!(reg.email.as_ref(), "ada@example.org");
        assert_eq!(reg.password(), "s3cret-pass");
    }

    #[rstest]
    fn rejects_password_confirmation_mismatch() {
        let err = registration(
            "Ada Lovelace",
            "ada@example.org",
            "07000000000",
            "s3cret-pass",
            "different",
        )
        .expect_err("mismatched confirmation");
        assert_eq!(err, UserValidationError::PasswordMismatch);
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("missing@tld")]
    #[case("two@@example.org")]
    #[case("spaces in@example.org")]
    #[case("")]
    fn rejects_malformed_emails(#[case] email: &str) {
        let err = EmailAddress::new(email).expect_err("malformed email");
        assert_eq!(err, UserValidationError::InvalidEmail);
    }

    #[rstest]
    #[case("ab", UserValidationError::FullNameTooShort { min: FULL_NAME_MIN })]
    fn rejects_short_full_name(#[case] name: &str, #[case] expected: UserValidationError) {
        let err = registration(name, "ada@example.org", "07000000000", "s3cret", "s3cret")
            .expect_err("short name");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("123456", UserValidationError::PhoneTooShort { min: PHONE_MIN })]
    #[case("123456789012345678901", UserValidationError::PhoneTooLong { max: PHONE_MAX })]
    fn rejects_out_of_range_phone(#[case] phone: &str, #[case] expected: UserValidationError) {
        let err = registration("Ada Lovelace", "ada@example.org", phone, "s3cret", "s3cret")
            .expect_err("phone out of range");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_short_password() {
        let err = registration(
            "Ada Lovelace",
            "ada@example.org",
            "07000000000",
            "short",
            "short",
        )
        .expect_err("short password");
        assert_eq!(
            err,
            UserValidationError::PasswordTooShort { min: PASSWORD_MIN }
        );
    }

    #[rstest]
    fn summary_drops_the_password_hash() {
        let user = User {
            id: UserId::random(),
            full_name: "Ada Lovelace".into(),
            email: EmailAddress::new("ada@example.org").expect("valid email"),
            phone_number: "07000000000".into(),
            password_hash: "$argon2id$opaque".into(),
            created_at: Utc::now(),
        };
        let summary = UserSummary::from(user.clone());
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.email, user.email);
    }

    #[rstest]
    fn login_credentials_require_a_password() {
        let err = LoginCredentials::try_from_parts("ada@example.org", "")
            .expect_err("empty password");
        assert_eq!(err, UserValidationError::EmptyPassword);
    }
}
