// handlers/protected/users.rs - /users and /users/:id
//
// Profiles are readable and writable only by their owner. The admin account
// can never be deleted, not even by itself.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::policy::{authorize, authorize_owner, Action, Resource};
use crate::auth::{UserId, ADMIN_USER_ID};
use crate::database::models::User;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::validation::{validate_email, validate_user_name};
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::user_service::{UserChanges, UserService};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub user_name: String,
    pub email: String,
    pub preferences: Option<String>,
}

/// GET /users - every user without password hashes
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn users_list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<User>> {
    authorize(&user, Action::List, Resource::User)?;
    let users = UserService::new(state.pool).select_all().await?;
    Ok(ApiResponse::success(users))
}

/// GET /users/:id
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 403, description = "Not the requester's profile", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn user_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<UserId>, PathRejection>,
) -> ApiResult<User> {
    let Path(user_id) = path?;
    authorize_owner(&user, Action::Read, Resource::User, user_id, "Access denied")?;

    UserService::new(state.pool)
        .select_one(user_id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// PUT /users/:id
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 403, description = "Not the requester's profile", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "User name or email already taken", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn user_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(user_id) = path?;
    authorize_owner(&user, Action::Update, Resource::User, user_id, "Access denied")?;
    let Json(request) = payload?;

    validate_user_name(&request.user_name)?;
    validate_email(&request.email)?;

    let changes = UserChanges {
        user_name: &request.user_name,
        email: &request.email,
        preferences: request.preferences.as_deref(),
    };

    if UserService::new(state.pool).update_one(user_id, &changes).await? {
        Ok(message("User updated successfully"))
    } else {
        Err(ApiError::not_found("User not found"))
    }
}

/// DELETE /users/:id - dependent ratings, reviews, history and recommendations go with it
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Not the requester's profile, or the admin account", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<UserId>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(user_id) = path?;
    authorize_owner(&user, Action::Delete, Resource::User, user_id, "Access denied")?;
    if user_id == ADMIN_USER_ID {
        return Err(ApiError::forbidden("Admin user cannot be deleted"));
    }

    if UserService::new(state.pool).delete_one(user_id).await? {
        Ok(message("User deleted successfully"))
    } else {
        Err(ApiError::not_found("User not found"))
    }
}
