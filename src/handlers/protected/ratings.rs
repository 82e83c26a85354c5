// handlers/protected/ratings.rs - /ratings and /movies/:id/ratings
//
// A rating always belongs to the token subject. Update and delete look up
// the owner first: a missing rating is 404, someone else's is 403.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::policy::{authorize, authorize_owned, Action, Resource};
use crate::database::models::MovieRating;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::validation::validate_score;
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::RatingService;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRatingRequest {
    pub movie_id: i32,
    /// 1.0 to 5.0, one decimal place kept
    pub score: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRatingRequest {
    pub score: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingCreated {
    pub message: String,
    pub rating_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingList {
    pub ratings: Vec<MovieRating>,
}

/// POST /ratings
#[utoipa::path(
    post,
    path = "/ratings",
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating added", body = RatingCreated),
        (status = 400, description = "Score out of range", body = ErrorBody),
        (status = 409, description = "Unknown movie", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn rating_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateRatingRequest>, JsonRejection>,
) -> ApiResult<RatingCreated> {
    authorize(&user, Action::Create, Resource::Rating)?;
    let Json(request) = payload?;
    validate_score(request.score)?;

    let rating_id = RatingService::new(state.pool)
        .create_one(user.user_id, request.movie_id, request.score)
        .await?;

    Ok(ApiResponse::created(RatingCreated {
        message: "Rating added successfully".to_string(),
        rating_id,
    }))
}

/// GET /movies/:id/ratings
#[utoipa::path(
    get,
    path = "/movies/{id}/ratings",
    params(("id" = i32, Path, description = "Movie id")),
    responses((status = 200, description = "Ratings with author names", body = RatingList)),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn movie_ratings_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<RatingList> {
    let Path(movie_id) = path?;
    authorize(&user, Action::List, Resource::Rating)?;
    let ratings = RatingService::new(state.pool).select_for_movie(movie_id).await?;
    Ok(ApiResponse::success(RatingList { ratings }))
}

/// PUT /ratings/:id
#[utoipa::path(
    put,
    path = "/ratings/{id}",
    params(("id" = i32, Path, description = "Rating id")),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = MessageResponse),
        (status = 403, description = "Someone else's rating", body = ErrorBody),
        (status = 404, description = "Rating not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn rating_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateRatingRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(rating_id) = path?;
    let ratings = RatingService::new(state.pool);
    authorize_owned(
        &user,
        Action::Update,
        Resource::Rating,
        || ratings.select_owner(rating_id),
        "Rating not found",
        "Unauthorized to update this rating",
    )
    .await?;

    let Json(request) = payload?;
    validate_score(request.score)?;

    if ratings.update_one(rating_id, request.score).await? {
        Ok(message("Rating updated successfully"))
    } else {
        Err(ApiError::not_found("Rating not found"))
    }
}

/// DELETE /ratings/:id
#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    params(("id" = i32, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating deleted", body = MessageResponse),
        (status = 403, description = "Someone else's rating", body = ErrorBody),
        (status = 404, description = "Rating not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn rating_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(rating_id) = path?;
    let ratings = RatingService::new(state.pool);
    authorize_owned(
        &user,
        Action::Delete,
        Resource::Rating,
        || ratings.select_owner(rating_id),
        "Rating not found",
        "Unauthorized to delete this rating",
    )
    .await?;

    if ratings.delete_one(rating_id).await? {
        Ok(message("Rating deleted successfully"))
    } else {
        Err(ApiError::not_found("Rating not found"))
    }
}
