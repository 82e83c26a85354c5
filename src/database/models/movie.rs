use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Movie {
    pub movie_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Running time in minutes
    pub duration: Option<i32>,
}
