//! Signup and login handlers.
//!
//! ```text
//! POST /api/signup {"name":"Ann","email":"ann@x.com","password":"secret1"}
//! POST /api/login {"email":"ann@x.com","password":"secret1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, LoginValidationError, SignupDetails,
    SignupValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Message returned with a freshly created account.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";
/// Message returned after a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Signup request body for `POST /api/signup`.
///
/// Absent fields deserialize to `None` so they are reported as missing
/// fields rather than malformed JSON.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    /// Display name.
    #[schema(example = "Ann")]
    pub name: Option<String>,
    /// Email address, unique across accounts.
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
    /// Plaintext password of at least six characters.
    #[schema(example = "secret1", format = Password)]
    pub password: Option<String>,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = SignupValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref().unwrap_or_default(),
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Login request body for `POST /api/login`.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Registered email address.
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
    /// Plaintext password.
    #[schema(example = "secret1", format = Password)]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserSummary {
    /// Account identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name.
    #[schema(example = "Ann")]
    pub name: String,
    /// Email address.
    #[schema(example = "ann@x.com")]
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Response body for a successful signup or login.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Outcome message shown to the user.
    #[schema(example = "Login successful")]
    pub message: String,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// The signed-in account.
    pub user: UserSummary,
}

impl AuthResponse {
    fn new(message: &str, outcome: &AuthenticatedUser) -> Self {
        Self {
            message: message.to_owned(),
            token: outcome.session().token().as_str().to_owned(),
            user: UserSummary::from(outcome.user()),
        }
    }
}

/// Register a new account and issue a session token.
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details =
        SignupDetails::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let outcome = state.accounts.signup(details).await?;
    Ok(HttpResponse::Created().json(AuthResponse::new(SIGNUP_SUCCESS_MESSAGE, &outcome)))
}

/// Authenticate with email and password and issue a session token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let outcome = state.accounts.login(&credentials).await?;
    Ok(web::Json(AuthResponse::new(LOGIN_SUCCESS_MESSAGE, &outcome)))
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    let details = match &err {
        SignupValidationError::MissingFields => json!({ "code": "missing_fields" }),
        SignupValidationError::InvalidEmail => {
            json!({ "field": "email", "code": "invalid_email" })
        }
        SignupValidationError::NameTooLong { max } => {
            json!({ "field": "name", "code": "name_too_long", "max": max })
        }
        SignupValidationError::EmailTooLong { max } => {
            json!({ "field": "email", "code": "email_too_long", "max": max })
        }
        SignupValidationError::PasswordTooShort { min } => {
            json!({ "field": "password", "code": "password_too_short", "min": min })
        }
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::MissingFields => Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "missing_fields" })),
    }
}
