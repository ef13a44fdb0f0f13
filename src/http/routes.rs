//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{health_check, list_videos, search_videos, version_check};
use super::watch::watch_video;

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        // Catalog API
        .route("/videos", get(list_videos))
        .route("/s", get(search_videos))
        .route("/w", get(watch_video).head(watch_video))
        // Page shells and assets
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/search", ServeFile::new(static_dir.join("search.html")))
        .route_service("/watch", ServeFile::new(static_dir.join("video.html")))
        .nest_service("/public", ServeDir::new(static_dir.join("public")))
        .layer(TraceLayer::new_for_http());

    let router = if state.config.cors_enabled {
        // Media elements issue range requests, so `Range` must be allowed
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .allow_headers([header::ACCEPT, header::RANGE, header::ORIGIN])
            .expose_headers([
                header::ACCEPT_RANGES,
                header::CONTENT_RANGE,
                header::CONTENT_LENGTH,
            ])
            .max_age(Duration::from_secs(3600));
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}
