// handlers/protected/genres.rs - /genres and /genres/:id

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::policy::{authorize, Action, Resource};
use crate::database::models::Genre;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::validation::validate_genre_name;
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::GenreService;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenreRequest {
    pub genre_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreCreated {
    pub message: String,
    pub genre_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreDetail {
    pub genre: Genre,
}

/// POST /genres
#[utoipa::path(
    post,
    path = "/genres",
    request_body = GenreRequest,
    responses(
        (status = 201, description = "Genre created", body = GenreCreated),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 409, description = "Genre name already exists", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn genre_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<GenreRequest>, JsonRejection>,
) -> ApiResult<GenreCreated> {
    authorize(&user, Action::Create, Resource::Genre)?;
    let Json(request) = payload?;
    validate_genre_name(&request.genre_name)?;

    let genre_id = GenreService::new(state.pool).create_one(&request.genre_name).await?;
    Ok(ApiResponse::created(GenreCreated {
        message: "Genre created successfully".to_string(),
        genre_id,
    }))
}

/// GET /genres
#[utoipa::path(
    get,
    path = "/genres",
    responses((status = 200, description = "All genres", body = GenreList)),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn genres_list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<GenreList> {
    authorize(&user, Action::List, Resource::Genre)?;
    let genres = GenreService::new(state.pool).select_all().await?;
    Ok(ApiResponse::success(GenreList { genres }))
}

/// GET /genres/:id
#[utoipa::path(
    get,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre", body = GenreDetail),
        (status = 404, description = "Genre not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn genre_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<GenreDetail> {
    let Path(genre_id) = path?;
    authorize(&user, Action::Read, Resource::Genre)?;

    GenreService::new(state.pool)
        .select_one(genre_id)
        .await?
        .map(|genre| ApiResponse::success(GenreDetail { genre }))
        .ok_or_else(|| ApiError::not_found("Genre not found"))
}

/// PUT /genres/:id
#[utoipa::path(
    put,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    request_body = GenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 404, description = "Genre not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn genre_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<GenreRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(genre_id) = path?;
    authorize(&user, Action::Update, Resource::Genre)?;
    let Json(request) = payload?;
    validate_genre_name(&request.genre_name)?;

    if GenreService::new(state.pool).update_one(genre_id, &request.genre_name).await? {
        Ok(message("Genre updated successfully"))
    } else {
        Err(ApiError::not_found("Genre not found"))
    }
}

/// DELETE /genres/:id - refused with 409 while any movie is linked to the genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre deleted", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 404, description = "Genre not found", body = ErrorBody),
        (status = 409, description = "Genre still linked to a movie", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn genre_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(genre_id) = path?;
    authorize(&user, Action::Delete, Resource::Genre)?;

    if GenreService::new(state.pool).delete_one(genre_id).await? {
        Ok(message("Genre deleted successfully"))
    } else {
        Err(ApiError::not_found("Genre not found"))
    }
}
