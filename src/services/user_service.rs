use sqlx::PgPool;
use tracing::info;

use crate::auth::UserId;
use crate::database::models::{User, UserCredentials};
use crate::database::DatabaseError;

/// Fields accepted from registration and profile updates
#[derive(Debug, Clone)]
pub struct UserChanges<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    pub preferences: Option<&'a str>,
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user with an already-hashed password
    pub async fn create_one(&self, user_name: &str, email: &str, password_hash: &str) -> Result<UserId, DatabaseError> {
        let (user_id,): (UserId,) = sqlx::query_as(
            "INSERT INTO users (user_name, email, password) VALUES ($1, $2, $3) RETURNING user_id",
        )
        .bind(user_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        info!("Registered user {}", user_id);
        Ok(user_id)
    }

    pub async fn select_all(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, email, preferences FROM users ORDER BY user_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn select_one(&self, user_id: UserId) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, email, preferences FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn select_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        let row = sqlx::query_as::<_, UserCredentials>("SELECT user_id, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Returns false when no such user exists
    pub async fn update_one(&self, user_id: UserId, changes: &UserChanges<'_>) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET user_name = $1, email = $2, preferences = $3 WHERE user_id = $4",
        )
        .bind(changes.user_name)
        .bind(changes.email)
        .bind(changes.preferences)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!("Updated user {}", user_id);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Ratings, reviews, watch history and recommendations cascade
    pub async fn delete_one(&self, user_id: UserId) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted user {}", user_id);
        }
        Ok(result.rows_affected() > 0)
    }
}
