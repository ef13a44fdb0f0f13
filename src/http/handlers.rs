//! HTTP request handlers
//!
//! Catalog listing, search and the operational endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{search, CatalogEntry};
use crate::state::AppState;

/// Message returned for unknown video ids
pub const VIDEO_NOT_FOUND_MSG: &str = "No Video with that ID!";

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    VideoNotFound,
    InternalError(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::VideoNotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "msg": VIDEO_NOT_FOUND_MSG })),
            )
                .into_response(),
            HttpError::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

/// Body of the catalog and search endpoints
#[derive(Debug, Serialize)]
pub struct VideosResponse<'a> {
    pub videos: Vec<&'a CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("videopile v", env!("CARGO_PKG_VERSION"))
}

/// Full catalog
/// GET /videos
pub async fn list_videos(State(state): State<Arc<AppState>>) -> Response {
    let catalog = state.catalog();
    Json(VideosResponse {
        videos: catalog.entries().iter().collect(),
    })
    .into_response()
}

/// Title search
/// GET /s?q={text}
pub async fn search_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let q = match query.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return Redirect::to("/").into_response(),
    };

    let catalog = state.catalog();
    Json(VideosResponse {
        videos: search(&catalog, q),
    })
    .into_response()
}
