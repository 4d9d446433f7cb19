//! Account API handlers.
//!
//! ```text
//! POST /api/v1/auth/register
//! POST /api/v1/auth/login
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, LoginCredentials, Registration, UserSummary, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = UserValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.full_name,
            &value.email,
            value.phone_number,
            value.password,
            &value.confirm_password,
        )
    }
}

/// Response payload for a registered account. Never carries the hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<UserSummary> for UserResponse {
    fn from(value: UserSummary) -> Self {
        Self {
            id: *value.id.as_uuid(),
            full_name: value.full_name,
            email: value.email.into(),
            phone_number: value.phone_number,
        }
    }
}

/// Request payload for `POST /api/v1/auth/login`.
///
/// Example JSON:
/// `{"email":"ada@example.org","password":"s3cret-pass"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response payload carrying the signed bearer token.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::FullNameTooShort { .. } => ("fullName", "too_short"),
        UserValidationError::FullNameTooLong { .. } => ("fullName", "too_long"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::PhoneTooShort { .. } => ("phoneNumber", "too_short"),
        UserValidationError::PhoneTooLong { .. } => ("phoneNumber", "too_long"),
        UserValidationError::PasswordTooShort { .. } => ("password", "too_short"),
        UserValidationError::PasswordTooLong { .. } => ("password", "too_long"),
        UserValidationError::PasswordMismatch => ("confirmPassword", "password_mismatch"),
        UserValidationError::EmptyPassword => ("password", "missing_field"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let summary = state.accounts.register(registration).await?;
    Ok(web::Json(UserResponse::from(summary)))
}

/// Authenticate and obtain a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(map_user_validation_error)?;
    let token = state.accounts.login(credentials).await?;
    Ok(web::Json(TokenResponse {
        access_token: token.into(),
        token_type: "bearer".to_owned(),
    }))
}
