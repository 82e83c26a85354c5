use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecommendedMovie {
    pub recommendation_id: i32,
    pub movie_id: i32,
    pub title: String,
}
