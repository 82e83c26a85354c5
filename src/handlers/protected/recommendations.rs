// handlers/protected/recommendations.rs - /recommendations
//
// The admin recommends movies to users; each user reads only their own.

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
use crate::auth::UserId;
use crate::database::models::RecommendedMovie;
use crate::error::{ApiError, ErrorBody};
use crate::middleware::{message, ApiResponse, ApiResult, AuthUser, MessageResponse};
use crate::services::{RecommendationOutcome, RecommendationService};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecommendationRequest {
    pub user_id: UserId,
    pub movie_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationCreated {
    pub message: String,
    pub recommendation_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationList {
    pub recommendations: Vec<RecommendedMovie>,
}

/// POST /recommendations - refused when the user has already watched the movie
#[utoipa::path(
    post,
    path = "/recommendations",
    request_body = RecommendationRequest,
    responses(
        (status = 201, description = "Recommendation added", body = RecommendationCreated),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 409, description = "Already watched, or unknown user or movie", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Recommendations"
)]
pub async fn recommendation_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> ApiResult<RecommendationCreated> {
    authorize(&user, Action::Create, Resource::Recommendation)?;
    let Json(request) = payload?;

    match RecommendationService::new(state.pool)
        .create_one(request.user_id, request.movie_id)
        .await?
    {
        RecommendationOutcome::Added(recommendation_id) => Ok(ApiResponse::created(RecommendationCreated {
            message: "Recommendation added successfully".to_string(),
            recommendation_id,
        })),
        RecommendationOutcome::AlreadyWatched => Err(ApiError::conflict(
            "User has already watched this movie. Recommendation not added.",
        )),
    }
}

/// GET /recommendations - the requester's own recommendations
#[utoipa::path(
    get,
    path = "/recommendations",
    responses((status = 200, description = "Recommendations for the requester", body = RecommendationList)),
    security(("bearer_auth" = [])),
    tag = "Recommendations"
)]
pub async fn recommendations_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<RecommendationList> {
    authorize(&user, Action::List, Resource::Recommendation)?;
    let recommendations = RecommendationService::new(state.pool)
        .select_for_user(user.user_id)
        .await?;
    Ok(ApiResponse::success(RecommendationList { recommendations }))
}

/// DELETE /recommendations/:user_id/:movie_id
#[utoipa::path(
    delete,
    path = "/recommendations/{user_id}/{movie_id}",
    params(
        ("user_id" = i32, Path, description = "Recommended-to user id"),
        ("movie_id" = i32, Path, description = "Movie id"),
    ),
    responses(
        (status = 200, description = "Recommendation deleted", body = MessageResponse),
        (status = 403, description = "Not the admin", body = ErrorBody),
        (status = 404, description = "Recommendation not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Recommendations"
)]
pub async fn recommendation_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(UserId, i32)>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path((user_id, movie_id)) = path?;
    authorize(&user, Action::Delete, Resource::Recommendation)?;

    if RecommendationService::new(state.pool)
        .delete_one(user_id, movie_id)
        .await?
    {
        Ok(message("Recommendation deleted successfully"))
    } else {
        Err(ApiError::not_found("Recommendation not found"))
    }
}
