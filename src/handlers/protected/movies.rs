// handlers/protected/movies.rs - /movies and /movies/:id
//
// Any token may read the catalogue; only the admin may change it.

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
use crate::database::models::Movie;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::validation::{validate_duration, validate_title};
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::movie_service::{MovieFields, MovieService};
use crate::state::AppState;

/// Body of both create and update; omitted optional fields are stored as null
#[derive(Debug, Deserialize, ToSchema)]
pub struct MovieRequest {
    pub title: String,
    pub description: Option<String>,
    /// Minutes
    pub duration: Option<i32>,
}

impl MovieRequest {
    fn validated(&self) -> Result<MovieFields<'_>, ApiError> {
        validate_title(&self.title)?;
        validate_duration(self.duration)?;
        Ok(MovieFields {
            title: &self.title,
            description: self.description.as_deref(),
            duration: self.duration,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieCreated {
    pub message: String,
    pub movie_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieList {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetail {
    pub movie: Movie,
}

/// POST /movies
#[utoipa::path(
    post,
    path = "/movies",
    request_body = MovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieCreated),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 403, description = "Not the admin", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn movie_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> ApiResult<MovieCreated> {
    authorize(&user, Action::Create, Resource::Movie)?;
    let Json(request) = payload?;
    let fields = request.validated()?;

    let movie_id = MovieService::new(state.pool).create_one(&fields).await?;
    Ok(ApiResponse::created(MovieCreated {
        message: "Movie created successfully".to_string(),
        movie_id,
    }))
}

/// GET /movies
#[utoipa::path(
    get,
    path = "/movies",
    responses((status = 200, description = "All movies", body = MovieList)),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn movies_list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<MovieList> {
    authorize(&user, Action::List, Resource::Movie)?;
    let movies = MovieService::new(state.pool).select_all().await?;
    Ok(ApiResponse::success(MovieList { movies }))
}

/// GET /movies/:id
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieDetail),
        (status = 404, description = "Movie not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn movie_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MovieDetail> {
    let Path(movie_id) = path?;
    authorize(&user, Action::Read, Resource::Movie)?;

    MovieService::new(state.pool)
        .select_one(movie_id)
        .await?
        .map(|movie| ApiResponse::success(MovieDetail { movie }))
        .ok_or_else(|| ApiError::not_found("Movie not found"))
}

/// PUT /movies/:id
#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie id")),
    request_body = MovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn movie_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(movie_id) = path?;
    authorize(&user, Action::Update, Resource::Movie)?;
    let Json(request) = payload?;
    let fields = request.validated()?;

    if MovieService::new(state.pool).update_one(movie_id, &fields).await? {
        Ok(message("Movie updated successfully"))
    } else {
        Err(ApiError::not_found("Movie not found"))
    }
}

/// DELETE /movies/:id - refused with 409 while ratings, reviews, history,
/// recommendations or genre links reference the movie
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody),
        (status = 409, description = "Movie still referenced", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn movie_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(movie_id) = path?;
    authorize(&user, Action::Delete, Resource::Movie)?;

    if MovieService::new(state.pool).delete_one(movie_id).await? {
        Ok(message("Movie deleted successfully"))
    } else {
        Err(ApiError::not_found("Movie not found"))
    }
}
