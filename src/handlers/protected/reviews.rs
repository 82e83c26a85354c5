// handlers/protected/reviews.rs - /reviews and /movies/:id/reviews

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
use crate::database::models::MovieReview;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::validation::validate_review_text;
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::ReviewService;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub movie_id: i32,
    pub review_text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub review_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewCreated {
    pub message: String,
    pub review_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub reviews: Vec<MovieReview>,
}

/// POST /reviews - authored by the token subject
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review added", body = ReviewCreated),
        (status = 400, description = "Empty review", body = ErrorBody),
        (status = 409, description = "Unknown movie", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn review_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> ApiResult<ReviewCreated> {
    authorize(&user, Action::Create, Resource::Review)?;
    let Json(request) = payload?;
    validate_review_text(&request.review_text)?;

    let review_id = ReviewService::new(state.pool)
        .create_one(user.user_id, request.movie_id, &request.review_text)
        .await?;

    Ok(ApiResponse::created(ReviewCreated {
        message: "Review added successfully".to_string(),
        review_id,
    }))
}

/// GET /movies/:id/reviews
#[utoipa::path(
    get,
    path = "/movies/{id}/reviews",
    params(("id" = i32, Path, description = "Movie id")),
    responses((status = 200, description = "Reviews with author names", body = ReviewList)),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn movie_reviews_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<ReviewList> {
    let Path(movie_id) = path?;
    authorize(&user, Action::List, Resource::Review)?;
    let reviews = ReviewService::new(state.pool).select_for_movie(movie_id).await?;
    Ok(ApiResponse::success(ReviewList { reviews }))
}

/// PUT /reviews/:id
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    params(("id" = i32, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = MessageResponse),
        (status = 403, description = "Someone else's review", body = ErrorBody),
        (status = 404, description = "Review not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn review_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(review_id) = path?;
    let reviews = ReviewService::new(state.pool);
    authorize_owned(
        &user,
        Action::Update,
        Resource::Review,
        || reviews.select_owner(review_id),
        "Review not found",
        "Unauthorized to update this review",
    )
    .await?;

    let Json(request) = payload?;
    validate_review_text(&request.review_text)?;

    if reviews.update_one(review_id, &request.review_text).await? {
        Ok(message("Review updated successfully"))
    } else {
        Err(ApiError::not_found("Review not found"))
    }
}

/// DELETE /reviews/:id
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 403, description = "Someone else's review", body = ErrorBody),
        (status = 404, description = "Review not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn review_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(review_id) = path?;
    let reviews = ReviewService::new(state.pool);
    authorize_owned(
        &user,
        Action::Delete,
        Resource::Review,
        || reviews.select_owner(review_id),
        "Review not found",
        "Unauthorized to delete this review",
    )
    .await?;

    if reviews.delete_one(review_id).await? {
        Ok(message("Review deleted successfully"))
    } else {
        Err(ApiError::not_found("Review not found"))
    }
}
