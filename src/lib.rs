pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    map_response_body::MapResponseBodyLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full router: public routes, token-protected routes and the
/// global layers.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .fallback(public::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config))
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes)),
        );

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/openapi.json", get(openapi::openapi_json))
        .route("/initialize-database", get(public::initialize_database))
        .route("/register", post(public::register))
        .route("/login", post(public::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{genres, movie_genres, movies, ratings, recommendations, reviews, stats, users, watch_history};

    Router::new()
        // Users
        .route("/users", get(users::users_list))
        .route(
            "/users/:id",
            get(users::user_get).put(users::user_update).delete(users::user_delete),
        )
        // Movies
        .route("/movies", get(movies::movies_list).post(movies::movie_create))
        .route(
            "/movies/:id",
            get(movies::movie_get).put(movies::movie_update).delete(movies::movie_delete),
        )
        .route("/movies/filter", get(stats::movies_filter))
        .route("/movies/top", get(stats::movies_top))
        .route("/movies/:id/genres", get(movie_genres::movie_genres_list))
        .route("/movies/:id/ratings", get(ratings::movie_ratings_list))
        .route("/movies/:id/reviews", get(reviews::movie_reviews_list))
        // Genres
        .route("/genres", get(genres::genres_list).post(genres::genre_create))
        .route(
            "/genres/:id",
            get(genres::genre_get).put(genres::genre_update).delete(genres::genre_delete),
        )
        .route("/genres/statistics", get(stats::genre_statistics))
        .route("/genres/top-rated-movie", get(stats::top_rated_movie_genres))
        .route("/genres/:id/movies", get(movie_genres::genre_movies_list))
        .route(
            "/movie-genre",
            post(movie_genres::movie_genre_create).delete(movie_genres::movie_genre_delete),
        )
        // Ratings and reviews
        .route("/ratings", post(ratings::rating_create))
        .route("/ratings/:id", put(ratings::rating_update).delete(ratings::rating_delete))
        .route("/reviews", post(reviews::review_create))
        .route("/reviews/:id", put(reviews::review_update).delete(reviews::review_delete))
        // Watch history and recommendations
        .route(
            "/watch-history",
            get(watch_history::watch_history_list).post(watch_history::watch_history_create),
        )
        .route(
            "/recommendations",
            get(recommendations::recommendations_list).post(recommendations::recommendation_create),
        )
        .route(
            "/recommendations/:user_id/:movie_id",
            delete(recommendations::recommendation_delete),
        )
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

/// Permissive when no origins are configured or `*` is listed
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = &config.security.cors_origins;
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
