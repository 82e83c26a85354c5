// handlers/public/auth.rs - POST /register, POST /login
//
// Token acquisition. Neither route requires a token; both validate every
// input field themselves.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::UserId;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::validation::{validate_email, validate_password, validate_user_name};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// POST /register - create an account with a bcrypt-hashed password
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 409, description = "User name or email already taken", body = ErrorBody),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<RegisterResponse> {
    let Json(request) = payload?;

    validate_user_name(&request.user_name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let hash = hash_password_blocking(request.password, state.config.security.bcrypt_cost).await?;
    let user_id = UserService::new(state.pool.clone())
        .create_one(&request.user_name, &request.email, &hash)
        .await?;

    Ok(ApiResponse::created(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// POST /login - exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;

    let credentials = UserService::new(state.pool.clone())
        .select_credentials(&request.email)
        .await?;

    let Some(credentials) = credentials else {
        // Equal bcrypt work whether or not the email exists
        let decoy = state.login_decoy.get(state.config.security.bcrypt_cost).await?;
        verify_password_blocking(request.password, decoy).await?;
        debug!("Login rejected: unknown email");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password_blocking(request.password, credentials.password).await? {
        debug!("Login rejected: wrong password for user {}", credentials.user_id);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.jwt.issue(credentials.user_id)?;
    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: state.jwt.expires_in(),
    }))
}
