// handlers/protected/stats.rs - aggregate read routes
//
// GET /movies/filter and GET /movies/top read their criteria from a JSON
// request body, which some HTTP clients and proxies will not send on GET.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::policy::{authorize, Action, Resource};
use crate::database::models::{FilteredMovie, GenreStatistics, TopMovie};
use crate::error::{ApiError, ErrorBody};
use crate::handlers::protected::genres::GenreList;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{MovieFilter, StatsService};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FilterRequest {
    pub genre_name: String,
    pub min_duration: i32,
    pub max_duration: i32,
    pub min_rating: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TopRequest {
    pub genre_name: String,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilteredMovieList {
    pub movies: Vec<FilteredMovie>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopMovieList {
    pub movies: Vec<TopMovie>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreStatisticsList {
    pub statistics: Vec<GenreStatistics>,
}

/// GET /movies/filter
#[utoipa::path(
    get,
    path = "/movies/filter",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Matching movies with their average rating", body = FilteredMovieList),
        (status = 400, description = "Missing or invalid criteria", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn movies_filter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<FilteredMovieList> {
    authorize(&user, Action::List, Resource::Statistics)?;
    let Json(request) = payload?;

    if request.min_duration > request.max_duration {
        return Err(ApiError::invalid_field("min_duration", "cannot exceed max_duration"));
    }
    if !request.min_rating.is_finite() {
        return Err(ApiError::invalid_field("min_rating", "must be a number"));
    }

    let filter = MovieFilter {
        genre_name: &request.genre_name,
        min_duration: request.min_duration,
        max_duration: request.max_duration,
        min_rating: request.min_rating,
    };
    let movies = StatsService::new(state.pool).filter_movies(&filter).await?;
    Ok(ApiResponse::success(FilteredMovieList { movies }))
}

/// GET /movies/top
#[utoipa::path(
    get,
    path = "/movies/top",
    request_body = TopRequest,
    responses(
        (status = 200, description = "Best rated movies of the genre", body = TopMovieList),
        (status = 400, description = "Missing genre or non-positive limit", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn movies_top(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<TopRequest>, JsonRejection>,
) -> ApiResult<TopMovieList> {
    authorize(&user, Action::List, Resource::Statistics)?;
    let Json(request) = payload?;

    if request.limit <= 0 {
        return Err(ApiError::invalid_field("limit", "must be positive"));
    }

    let movies = StatsService::new(state.pool)
        .top_movies(&request.genre_name, request.limit)
        .await?;
    Ok(ApiResponse::success(TopMovieList { movies }))
}

/// GET /genres/statistics
#[utoipa::path(
    get,
    path = "/genres/statistics",
    responses((status = 200, description = "Movie count and average rating per genre", body = GenreStatisticsList)),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn genre_statistics(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<GenreStatisticsList> {
    authorize(&user, Action::Read, Resource::Statistics)?;
    let statistics = StatsService::new(state.pool).genre_statistics().await?;
    Ok(ApiResponse::success(GenreStatisticsList { statistics }))
}

/// GET /genres/top-rated-movie - genres of the best-rated movie(s), ties included
#[utoipa::path(
    get,
    path = "/genres/top-rated-movie",
    responses((status = 200, description = "Genres of the top-rated movies", body = GenreList)),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn top_rated_movie_genres(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<GenreList> {
    authorize(&user, Action::Read, Resource::Statistics)?;
    let genres = StatsService::new(state.pool).top_rated_movie_genres().await?;
    Ok(ApiResponse::success(GenreList { genres }))
}
