use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware, require_session};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/genres", get(handlers::genres))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login));

    let protected = Router::new()
        .route("/auth/logout", post(handlers::logout))
        // Preferences
        .route(
            "/preferences",
            get(handlers::get_preferences).put(handlers::update_preferences),
        )
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        .route("/recommendations/more", post(handlers::load_more))
        // Catalog
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:id", get(handlers::get_movie))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    public.merge(protected)
}
