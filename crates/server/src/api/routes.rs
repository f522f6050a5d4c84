use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{facets, favorites, handlers, journeys, recommend, resolve};
use crate::metrics::track_http_metrics;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog
        .route("/facets", get(facets::list_facets))
        // Journeys
        .route("/journeys", post(journeys::create_journey))
        .route(
            "/journeys/{id}",
            get(journeys::get_journey).delete(journeys::delete_journey),
        )
        .route("/journeys/{id}/select", post(journeys::select_value))
        .route("/journeys/{id}/skip", post(journeys::skip_step))
        .route("/journeys/{id}/skip-all", post(journeys::skip_all))
        .route("/journeys/{id}/retry", post(journeys::retry_journey))
        // One-shot resolution
        .route("/resolve", post(resolve::resolve_selection))
        // Favorites
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route(
            "/favorites/{surah}/{verse}",
            get(favorites::get_favorite).delete(favorites::remove_favorite),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/recommend", post(recommend::recommend))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(middleware::from_fn(track_http_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
