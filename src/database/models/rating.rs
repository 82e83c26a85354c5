use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::auth::UserId;

/// A rating of one movie joined with its author's name
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MovieRating {
    pub rating_id: i32,
    pub user_id: UserId,
    pub score: f64,
    pub user_name: String,
}
