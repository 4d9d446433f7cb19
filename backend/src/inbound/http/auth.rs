//! Bearer-token authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by
//! concentrating header parsing and user identity derivation here.

use actix_web::HttpRequest;
use actix_web::http::header;

use crate::domain::ports::TokenService;
use crate::domain::{Error, UserId};

use super::ApiResult;

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(req: &HttpRequest) -> ApiResult<&str> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let raw = header_value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    raw.strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))
}

/// Resolve the authenticated user for a request.
///
/// Missing, malformed, expired, and badly signed tokens all reject with an
/// `unauthorized` error; on success the embedded user id is returned.
pub fn require_user(req: &HttpRequest, tokens: &dyn TokenService) -> ApiResult<UserId> {
    let token = bearer_token(req)?;
    tokens
        .verify(token)
        .map_err(|err| Error::unauthorized(err.to_string()))
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{AccessToken, TokenError};
    use crate::domain::EmailAddress;

    struct PrefixTokenService;

    impl TokenService for PrefixTokenService {
        fn issue(
            &self,
            user_id: &UserId,
            _email: &EmailAddress,
        ) -> Result<AccessToken, TokenError> {
            Ok(AccessToken::new(format!("token:{user_id}")))
        }

        fn verify(&self, token: &str) -> Result<UserId, TokenError> {
            token
                .strip_prefix("token:")
                .and_then(|raw| Uuid::parse_str(raw).ok())
                .map(UserId::from_uuid)
                .ok_or_else(TokenError::invalid)
        }
    }

    #[rstest]
    fn accepts_a_valid_bearer_header() {
        let user_id = UserId::random();
        let req = TestRequest::get()
            .insert_header(("Authorization", format!("Bearer token:{user_id}")))
            .to_http_request();

        let resolved = require_user(&req, &PrefixTokenService).expect("token accepted");
        assert_eq!(resolved, user_id);
    }

    #[rstest]
    fn rejects_a_missing_header() {
        let req = TestRequest::get().to_http_request();
        let err = require_user(&req, &PrefixTokenService).expect_err("missing header");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case("Basic dXNlcjpwdw==")]
    #[case("Bearer ")]
    #[case("token:not-prefixed")]
    fn rejects_non_bearer_schemes(#[case] header_value: &str) {
        let req = TestRequest::get()
            .insert_header(("Authorization", header_value))
            .to_http_request();

        let err = require_user(&req, &PrefixTokenService).expect_err("scheme rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn rejects_a_token_the_verifier_refuses() {
        let req = TestRequest::get()
            .insert_header(("Authorization", "Bearer token:not-a-uuid"))
            .to_http_request();

        let err = require_user(&req, &PrefixTokenService).expect_err("verifier rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid or expired token");
    }
}
