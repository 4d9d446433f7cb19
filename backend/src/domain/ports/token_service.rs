//! Port abstraction for signed bearer-token issuance and verification.

use crate::domain::{EmailAddress, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token service adapters.
    pub enum TokenError {
        /// Signing the claims failed.
        Issue { message: String } => "token issuance failed: {message}",
        /// The token is missing, malformed, expired, or fails signature
        /// verification. Deliberately carries no detail.
        Invalid => "invalid or expired token",
    }
}

/// A signed, time-bounded credential asserting a user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token string.
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// The encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Sign and verify compact claims with an expiry owned by the adapter.
pub trait TokenService: Send + Sync {
    /// Issue a token carrying the user id and email as claims.
    fn issue(&self, user_id: &UserId, email: &EmailAddress) -> Result<AccessToken, TokenError>;

    /// Verify a presented token and expose the embedded user identifier.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
