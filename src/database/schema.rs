//! Relational schema and one-time initialization.
//!
//! Whether the schema exists is asked of the store itself, never of process
//! memory. Creation runs in one transaction holding an advisory lock, so two
//! concurrent initializers cannot both create it.

use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::auth::ADMIN_USER_ID;

use super::DatabaseError;

/// Arbitrary key for `pg_advisory_xact_lock`, shared by all initializers
const SCHEMA_LOCK_KEY: i64 = 0x46_49_4c_4d_52_45_43; // "FILMREC"

/// Created last, so its presence means the whole schema exists
const SENTINEL_TABLE: &str = "recommendations";

pub const ADMIN_USER_NAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@example.com";

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id SERIAL PRIMARY KEY,
        user_name VARCHAR(100) NOT NULL,
        email VARCHAR(100) NOT NULL,
        password VARCHAR(255) NOT NULL,
        preferences TEXT,
        CONSTRAINT users_user_name_key UNIQUE (user_name),
        CONSTRAINT users_email_key UNIQUE (email),
        CONSTRAINT users_user_name_length CHECK (LENGTH(user_name) > 3),
        CONSTRAINT users_email_format CHECK (email LIKE '%_@_%.__%')
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        movie_id SERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        duration INT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS genres (
        genre_id SERIAL PRIMARY KEY,
        genre_name VARCHAR(100) NOT NULL,
        CONSTRAINT genres_genre_name_key UNIQUE (genre_name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movie_genres (
        movie_id INT NOT NULL,
        genre_id INT NOT NULL,
        PRIMARY KEY (movie_id, genre_id),
        CONSTRAINT movie_genres_movie_fk FOREIGN KEY (movie_id) REFERENCES movies(movie_id)
            ON DELETE RESTRICT ON UPDATE CASCADE,
        CONSTRAINT movie_genres_genre_fk FOREIGN KEY (genre_id) REFERENCES genres(genre_id)
            ON DELETE RESTRICT ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ratings (
        rating_id SERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        movie_id INT NOT NULL,
        score NUMERIC(2, 1) NOT NULL,
        CONSTRAINT ratings_score_range CHECK (score BETWEEN 1.0 AND 5.0),
        CONSTRAINT ratings_user_fk FOREIGN KEY (user_id) REFERENCES users(user_id)
            ON DELETE CASCADE ON UPDATE CASCADE,
        CONSTRAINT ratings_movie_fk FOREIGN KEY (movie_id) REFERENCES movies(movie_id)
            ON DELETE RESTRICT ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        review_id SERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        movie_id INT NOT NULL,
        review_text TEXT NOT NULL,
        CONSTRAINT reviews_user_fk FOREIGN KEY (user_id) REFERENCES users(user_id)
            ON DELETE CASCADE ON UPDATE CASCADE,
        CONSTRAINT reviews_movie_fk FOREIGN KEY (movie_id) REFERENCES movies(movie_id)
            ON DELETE RESTRICT ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS watch_history (
        history_id SERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        movie_id INT NOT NULL,
        CONSTRAINT watch_history_user_fk FOREIGN KEY (user_id) REFERENCES users(user_id)
            ON DELETE CASCADE ON UPDATE CASCADE,
        CONSTRAINT watch_history_movie_fk FOREIGN KEY (movie_id) REFERENCES movies(movie_id)
            ON DELETE RESTRICT ON UPDATE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recommendations (
        recommendation_id SERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        movie_id INT NOT NULL,
        CONSTRAINT recommendations_user_fk FOREIGN KEY (user_id) REFERENCES users(user_id)
            ON DELETE CASCADE ON UPDATE CASCADE,
        CONSTRAINT recommendations_movie_fk FOREIGN KEY (movie_id) REFERENCES movies(movie_id)
            ON DELETE RESTRICT ON UPDATE CASCADE
    )
    "#,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyInitialized,
}

/// True once every table exists in the connection's current schema
pub async fn is_initialized(pool: &PgPool) -> Result<bool, DatabaseError> {
    table_exists(pool, SENTINEL_TABLE).await
}

async fn table_exists<'e, E>(executor: E, table: &str) -> Result<bool, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = $1)",
    )
    .bind(table)
    .fetch_one(executor)
    .await?;
    Ok(exists)
}

/// Create all tables and seed the admin account with `admin_password_hash`.
pub async fn initialize(pool: &PgPool, admin_password_hash: &str) -> Result<InitOutcome, DatabaseError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    if table_exists(&mut *tx, SENTINEL_TABLE).await? {
        tx.rollback().await?;
        return Ok(InitOutcome::AlreadyInitialized);
    }

    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    sqlx::query(
        "INSERT INTO users (user_id, user_name, email, password, preferences) \
         VALUES ($1, $2, $3, $4, NULL) ON CONFLICT DO NOTHING",
    )
    .bind(ADMIN_USER_ID)
    .bind(ADMIN_USER_NAME)
    .bind(ADMIN_EMAIL)
    .bind(admin_password_hash)
    .execute(&mut *tx)
    .await?;

    // Explicit id insert does not advance the serial
    sqlx::query("SELECT setval(pg_get_serial_sequence('users', 'user_id'), (SELECT MAX(user_id) FROM users))")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!("Database schema created and admin account seeded");
    Ok(InitOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_table_is_created_last() {
        let last = SCHEMA_STATEMENTS.last().unwrap();
        assert!(last.contains(&format!("CREATE TABLE IF NOT EXISTS {}", SENTINEL_TABLE)));
    }

    #[test]
    fn dependents_cascade_with_user_and_restrict_movie() {
        for table in ["ratings", "reviews", "watch_history", "recommendations"] {
            let ddl = SCHEMA_STATEMENTS
                .iter()
                .find(|s| s.contains(&format!("CREATE TABLE IF NOT EXISTS {} ", table)))
                .unwrap();
            assert!(ddl.contains("REFERENCES users(user_id)\n            ON DELETE CASCADE"), "{}", table);
            assert!(ddl.contains("REFERENCES movies(movie_id)\n            ON DELETE RESTRICT"), "{}", table);
        }
    }
}
