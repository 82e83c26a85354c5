// handlers/protected/movie_genres.rs - movie/genre links
//
// POST and DELETE /movie-genre take the pair in the body. The two listing
// routes hang off the movie and genre paths.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::policy::{authorize, Action, Resource};
use crate::error::{ApiError, ErrorBody};
use crate::handlers::protected::genres::GenreList;
use crate::handlers::protected::movies::MovieList;
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::{GenreService, MovieService};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MovieGenreRequest {
    pub movie_id: i32,
    pub genre_id: i32,
}

/// POST /movie-genre
#[utoipa::path(
    post,
    path = "/movie-genre",
    request_body = MovieGenreRequest,
    responses(
        (status = 201, description = "Genre assigned", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 409, description = "Already linked, or unknown movie or genre", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Movie genres"
)]
pub async fn movie_genre_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MovieGenreRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    authorize(&user, Action::Create, Resource::MovieGenre)?;
    let Json(request) = payload?;

    GenreService::new(state.pool)
        .link_movie(request.movie_id, request.genre_id)
        .await?;

    Ok(ApiResponse::created(MessageResponse::new("Genre assigned to movie successfully")))
}

/// DELETE /movie-genre
#[utoipa::path(
    delete,
    path = "/movie-genre",
    request_body = MovieGenreRequest,
    responses(
        (status = 200, description = "Genre removed", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 404, description = "No such link", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Movie genres"
)]
pub async fn movie_genre_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MovieGenreRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    authorize(&user, Action::Delete, Resource::MovieGenre)?;
    let Json(request) = payload?;

    if GenreService::new(state.pool)
        .unlink_movie(request.movie_id, request.genre_id)
        .await?
    {
        Ok(message("Genre removed from movie successfully"))
    } else {
        Err(ApiError::not_found("Movie-Genre relationship not found"))
    }
}

/// GET /movies/:id/genres
#[utoipa::path(
    get,
    path = "/movies/{id}/genres",
    params(("id" = i32, Path, description = "Movie id")),
    responses((status = 200, description = "Genres of the movie", body = GenreList)),
    security(("bearer_auth" = [])),
    tag = "Movie genres"
)]
pub async fn movie_genres_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<GenreList> {
    let Path(movie_id) = path?;
    authorize(&user, Action::List, Resource::MovieGenre)?;
    let genres = MovieService::new(state.pool).select_genres(movie_id).await?;
    Ok(ApiResponse::success(GenreList { genres }))
}

/// GET /genres/:id/movies
#[utoipa::path(
    get,
    path = "/genres/{id}/movies",
    params(("id" = i32, Path, description = "Genre id")),
    responses((status = 200, description = "Movies of the genre", body = MovieList)),
    security(("bearer_auth" = [])),
    tag = "Movie genres"
)]
pub async fn genre_movies_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MovieList> {
    let Path(genre_id) = path?;
    authorize(&user, Action::List, Resource::MovieGenre)?;
    let movies = GenreService::new(state.pool).select_movies(genre_id).await?;
    Ok(ApiResponse::success(MovieList { movies }))
}
