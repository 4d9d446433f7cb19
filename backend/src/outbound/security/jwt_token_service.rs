//! HS256 JWT adapter for the `TokenService` port.
//!
//! Claims carry the user id (`sub`) and email, plus the issued-at and
//! expiry timestamps. Verification failures of any kind collapse into the
//! opaque `TokenError::Invalid` so callers cannot distinguish a forged
//! token from an expired one.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{AccessToken, TokenError, TokenService};
use crate::domain::{EmailAddress, UserId};

/// Default token validity.
pub const DEFAULT_TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// Signed claims object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    /// Login email at issuance time.
    email: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// HS256 token issuer/verifier over a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl JwtTokenService {
    /// Create a service signing with `secret` and the default validity.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_validity(secret, DEFAULT_TOKEN_VALIDITY)
    }

    /// Create a service signing with `secret` and an explicit validity.
    pub fn with_validity(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validity,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId, email: &EmailAddress) -> Result<AccessToken, TokenError> {
        let now = Utc::now().timestamp();
        let validity = i64::try_from(self.validity.as_secs())
            .map_err(|_| TokenError::issue("token validity out of range"))?;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.as_ref().to_owned(),
            iat: now,
            exp: now + validity,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::issue(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|_| TokenError::invalid())?;

        Uuid::parse_str(&data.claims.sub)
            .map(UserId::from_uuid)
            .map_err(|_| TokenError::invalid())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for issuance and verification.
    use super::*;
    use rstest::rstest;

    const SECRET: &[u8] = b"test-secret-at-least-32-bytes-long!!";

    fn email() -> EmailAddress {
        EmailAddress::new("ada@example.org").expect("valid email")
    }

    #[rstest]
    fn issue_then_verify_round_trips_the_user_id() {
        let service = JwtTokenService::new(SECRET);
        let user_id = UserId::random();

        let token = service.issue(&user_id, &email()).expect("issuance succeeds");
        let verified = service.verify(token.as_str()).expect("token verifies");

        assert_eq!(verified, user_id);
    }

    #[rstest]
    fn verify_rejects_a_token_signed_with_another_secret() {
        let issuer = JwtTokenService::new(b"one-secret-at-least-32-bytes-long!!!");
        let verifier = JwtTokenService::new(SECRET);

        let token = issuer
            .issue(&UserId::random(), &email())
            .expect("issuance succeeds");

        assert_eq!(verifier.verify(token.as_str()), Err(TokenError::Invalid));
    }

    #[rstest]
    fn verify_rejects_an_expired_token() {
        let service = JwtTokenService::new(SECRET);
        let now = Utc::now().timestamp();
        let expired = Claims {
            sub: UserId::random().to_string(),
            email: "ada@example.org".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &expired,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encoding succeeds");

        assert_eq!(service.verify(&token), Err(TokenError::Invalid));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-jwt")]
    #[case("aaaa.bbbb.cccc")]
    fn verify_rejects_malformed_tokens(#[case] token: &str) {
        let service = JwtTokenService::new(SECRET);
        assert_eq!(service.verify(token), Err(TokenError::Invalid));
    }
}
