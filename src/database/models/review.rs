use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::auth::UserId;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MovieReview {
    pub review_id: i32,
    pub user_id: UserId,
    pub review_text: String,
    pub user_name: String,
}
