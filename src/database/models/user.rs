use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::auth::UserId;

/// Public view of a user. The password hash is never selected into this type.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub preferences: Option<String>,
}

/// Login lookup row; stays inside the service layer
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub password: String,
}
