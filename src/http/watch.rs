//! Video streaming endpoint
//!
//! GET/HEAD /w?v={id}, honoring the `Range` header.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, Method},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::handlers::HttpError;
use crate::state::AppState;
use crate::stream::{open_window, parse_range, StreamPlan};

#[derive(Debug, Deserialize)]
pub struct WatchQuery {
    pub v: Option<String>,
}

/// Stream a catalog entry's file
pub async fn watch_video(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WatchQuery>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let entry = {
        let catalog = state.catalog();
        query
            .v
            .as_deref()
            .and_then(|id| catalog.get(id))
            .cloned()
            .ok_or(HttpError::VideoNotFound)?
    };

    let path = state.video_path(&entry);
    let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
        tracing::error!("File stat error for {:?}: {}", path, e);
        HttpError::InternalError(format!("Failed to stat {}", entry.file_name))
    })?;
    if !metadata.is_file() {
        tracing::error!("File stat error for {:?}: not a regular file", path);
        return Err(HttpError::InternalError(format!(
            "Failed to stat {}",
            entry.file_name
        )));
    }

    let range = headers
        .get(header::RANGE)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_range);
    let plan = StreamPlan::new(range, metadata.len(), method == Method::HEAD);

    let body = match plan.window() {
        Some((offset, len)) => open_window(&path, offset, len, &state.config.stream)
            .await
            .map_err(|e| {
                tracing::error!("Error opening file {:?}: {}", path, e);
                HttpError::InternalError(format!("Failed to read {}", entry.file_name))
            })?,
        None => Body::empty(),
    };

    let mut response = Response::builder()
        .status(plan.status())
        .header(header::CONTENT_TYPE, entry.content_type())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, plan.content_length());
    if let Some(content_range) = plan.content_range() {
        response = response.header(header::CONTENT_RANGE, content_range);
    }

    response
        .body(body)
        .map_err(|e| HttpError::InternalError(e.to_string()))
}
