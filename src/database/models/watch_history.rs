use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WatchedMovie {
    pub history_id: i32,
    pub movie_id: i32,
    pub title: String,
}
