// handlers/protected/watch_history.rs - /watch-history
//
// Both routes act on the token subject's own log; there is no way to name
// another user.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::policy::{authorize, Action, Resource};
use crate::database::models::WatchedMovie;
use crate::error::ErrorBody;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::WatchHistoryService;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct WatchHistoryRequest {
    pub movie_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WatchHistoryCreated {
    pub message: String,
    pub history_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WatchHistoryList {
    pub watch_history: Vec<WatchedMovie>,
}

/// POST /watch-history
#[utoipa::path(
    post,
    path = "/watch-history",
    request_body = WatchHistoryRequest,
    responses(
        (status = 201, description = "Movie logged", body = WatchHistoryCreated),
        (status = 409, description = "Unknown movie", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Watch history"
)]
pub async fn watch_history_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<WatchHistoryRequest>, JsonRejection>,
) -> ApiResult<WatchHistoryCreated> {
    authorize(&user, Action::Create, Resource::WatchHistory)?;
    let Json(request) = payload?;

    let history_id = WatchHistoryService::new(state.pool)
        .create_one(user.user_id, request.movie_id)
        .await?;

    Ok(ApiResponse::created(WatchHistoryCreated {
        message: "Movie added to watch history".to_string(),
        history_id,
    }))
}

/// GET /watch-history
#[utoipa::path(
    get,
    path = "/watch-history",
    responses((status = 200, description = "Requester's watch history", body = WatchHistoryList)),
    security(("bearer_auth" = [])),
    tag = "Watch history"
)]
pub async fn watch_history_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<WatchHistoryList> {
    authorize(&user, Action::List, Resource::WatchHistory)?;
    let watch_history = WatchHistoryService::new(state.pool)
        .select_for_user(user.user_id)
        .await?;
    Ok(ApiResponse::success(WatchHistoryList { watch_history }))
}
