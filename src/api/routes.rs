use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::middleware::{make_span, propagate_request_id};
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Movies
        .route("/movies", get(handlers::list_movies))
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:movie_id", get(handlers::movie_detail))
        // Genres
        .route("/genres", get(handlers::genre_list))
        // Recommendations & preferences
        .route("/recommendations", get(handlers::recommendations))
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences/genres", put(handlers::update_favorite_genres))
        // Favorites catalogue
        .route("/favorites", get(handlers::list_favorites))
        .route(
            "/favorites/:movie_id",
            axum::routing::post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(middleware::from_fn(propagate_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
