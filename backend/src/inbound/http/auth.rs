//! Authentication endpoints.
//!
//! ```text
//! POST /api/v1/auth/signup {"name":"Ada","email":"ada@example.com","password":"pw","passwordConfirmation":"pw"}
//! POST /api/v1/auth/login  {"email":"ada@example.com","password":"pw"}
//! ```
//!
//! Both endpoints are public; they are how a caller obtains the bearer
//! token the protected catalogue operations require.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::account_service::{LoginCredentials, SignupDetails};
use crate::domain::error::Error;
use crate::domain::token::AccessToken;
use crate::domain::user::{Email, Identity, UserName, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/v1/auth/signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name for the new account.
    pub name: String,
    /// Email address; must not already be registered.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Must equal `password` exactly.
    pub password_confirmation: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        let name = UserName::new(value.name).map_err(|err| field_error("name", &err))?;
        let email = Email::new(value.email).map_err(|err| field_error("email", &err))?;
        if value.password.is_empty() {
            return Err(empty_password_error());
        }
        Ok(SignupDetails {
            name,
            email,
            password: Zeroizing::new(value.password),
            password_confirmation: Zeroizing::new(value.password_confirmation),
        })
    }
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address to authenticate.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let email = Email::new(value.email).map_err(|err| field_error("email", &err))?;
        if value.password.is_empty() {
            return Err(empty_password_error());
        }
        Ok(LoginCredentials {
            email,
            password: Zeroizing::new(value.password),
        })
    }
}

/// Login response body carrying the signed bearer token.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token to present on protected operations.
    pub access_token: AccessToken,
}

fn field_error(field: &str, err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn empty_password_error() -> Error {
    Error::invalid_request("password must not be empty")
        .with_details(json!({ "field": "password" }))
}

/// Create a new PRO account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = Identity),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "User already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignupDetails::try_from(payload.into_inner())?;
    let identity = state.accounts.signup(details).await?;
    Ok(HttpResponse::Created().json(identity))
}

/// Login with email and password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "User logged in", body = LoginResponse),
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
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let access_token = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Created().json(LoginResponse { access_token }))
}
