//! OpenAPI document assembled from the handler annotations.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{protected, public};

/// Registers the `bearer_auth` scheme referenced by protected routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /login, sent as `Authorization: Bearer <token>`"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Film Recommendation Project API",
        description = "Movie catalogue with users, genres, ratings, reviews, watch history and admin-curated recommendations.\n\nEvery route except /, /health, /openapi.json, /initialize-database, /register and /login requires a bearer token."
    ),
    paths(
        // System
        public::system::root,
        public::system::health,
        public::system::initialize_database,
        // Auth
        public::auth::register,
        public::auth::login,
        // Users
        protected::users::users_list,
        protected::users::user_get,
        protected::users::user_update,
        protected::users::user_delete,
        // Movies
        protected::movies::movie_create,
        protected::movies::movies_list,
        protected::movies::movie_get,
        protected::movies::movie_update,
        protected::movies::movie_delete,
        // Genres
        protected::genres::genre_create,
        protected::genres::genres_list,
        protected::genres::genre_get,
        protected::genres::genre_update,
        protected::genres::genre_delete,
        // Movie genres
        protected::movie_genres::movie_genre_create,
        protected::movie_genres::movie_genre_delete,
        protected::movie_genres::movie_genres_list,
        protected::movie_genres::genre_movies_list,
        // Ratings
        protected::ratings::rating_create,
        protected::ratings::movie_ratings_list,
        protected::ratings::rating_update,
        protected::ratings::rating_delete,
        // Reviews
        protected::reviews::review_create,
        protected::reviews::movie_reviews_list,
        protected::reviews::review_update,
        protected::reviews::review_delete,
        // Watch history
        protected::watch_history::watch_history_create,
        protected::watch_history::watch_history_list,
        // Recommendations
        protected::recommendations::recommendation_create,
        protected::recommendations::recommendations_list,
        protected::recommendations::recommendation_delete,
        // Statistics
        protected::stats::movies_filter,
        protected::stats::movies_top,
        protected::stats::genre_statistics,
        protected::stats::top_rated_movie_genres,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::middleware::MessageResponse,
        crate::database::models::User,
        crate::database::models::Movie,
        crate::database::models::Genre,
        crate::database::models::MovieRating,
        crate::database::models::MovieReview,
        crate::database::models::WatchedMovie,
        crate::database::models::RecommendedMovie,
        crate::database::models::FilteredMovie,
        crate::database::models::TopMovie,
        crate::database::models::GenreStatistics,
        public::system::HealthResponse,
        public::auth::RegisterRequest,
        public::auth::RegisterResponse,
        public::auth::LoginRequest,
        public::auth::LoginResponse,
        protected::users::UpdateUserRequest,
        protected::movies::MovieRequest,
        protected::movies::MovieCreated,
        protected::movies::MovieList,
        protected::movies::MovieDetail,
        protected::genres::GenreRequest,
        protected::genres::GenreCreated,
        protected::genres::GenreList,
        protected::genres::GenreDetail,
        protected::movie_genres::MovieGenreRequest,
        protected::ratings::CreateRatingRequest,
        protected::ratings::UpdateRatingRequest,
        protected::ratings::RatingCreated,
        protected::ratings::RatingList,
        protected::reviews::CreateReviewRequest,
        protected::reviews::UpdateReviewRequest,
        protected::reviews::ReviewCreated,
        protected::reviews::ReviewList,
        protected::watch_history::WatchHistoryRequest,
        protected::watch_history::WatchHistoryCreated,
        protected::watch_history::WatchHistoryList,
        protected::recommendations::RecommendationRequest,
        protected::recommendations::RecommendationCreated,
        protected::recommendations::RecommendationList,
        protected::stats::FilterRequest,
        protected::stats::TopRequest,
        protected::stats::FilteredMovieList,
        protected::stats::TopMovieList,
        protected::stats::GenreStatisticsList,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Banner, health probe and schema bootstrap"),
        (name = "Auth", description = "Registration and token issue"),
        (name = "Users", description = "Profiles, owner only"),
        (name = "Movies", description = "Catalogue; changes are admin only"),
        (name = "Genres", description = "Genre catalogue; changes are admin only"),
        (name = "Movie genres", description = "Links between movies and genres"),
        (name = "Ratings", description = "1.0 to 5.0 scores, owner-managed"),
        (name = "Reviews", description = "Free-text reviews, owner-managed"),
        (name = "Watch history", description = "Requester's viewing log"),
        (name = "Recommendations", description = "Admin-curated suggestions"),
        (name = "Statistics", description = "Aggregate queries"),
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        for path in [
            "/register",
            "/login",
            "/users/{id}",
            "/movies/{id}",
            "/movies/filter",
            "/genres/statistics",
            "/movie-genre",
            "/ratings/{id}",
            "/reviews/{id}",
            "/watch-history",
            "/recommendations/{user_id}/{movie_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
