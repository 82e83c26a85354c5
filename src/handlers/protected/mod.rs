// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, which rejects a missing
// or invalid token with 401 and otherwise leaves an `AuthUser` in the request
// extensions. Each handler then checks its own policy rule (403 on failure)
// before touching data.

pub mod genres;
pub mod movie_genres;
pub mod movies;
pub mod ratings;
pub mod recommendations;
pub mod reviews;
pub mod stats;
pub mod users;
pub mod watch_history;
