use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Result row of the genre/duration/rating filter
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FilteredMovie {
    pub movie_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    /// Unrated movies count as 0
    pub avg_rating: f64,
}

/// Result row of the per-genre ranking
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TopMovie {
    pub movie_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GenreStatistics {
    pub genre_name: String,
    pub movie_count: i64,
    /// Rounded to two decimals; null when no movie of the genre is rated
    pub avg_rating: Option<f64>,
}
