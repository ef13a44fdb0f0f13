//! Test fixtures for integration tests
//!
//! Builds a throwaway content directory, indexes it and wires up a router.

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

use crate::catalog::{CatalogEntry, CatalogStore, MemoryStore};
use crate::config::ServerConfig;
use crate::http::create_router;
use crate::index::Indexer;
use crate::state::AppState;

/// A content directory with a live router over it
pub struct TestLibrary {
    pub dir: TempDir,
    pub state: Arc<AppState>,
    pub indexer: Indexer,
}

impl TestLibrary {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = ServerConfig::default();
        config.library.content_dir = dir.path().to_path_buf();
        config.static_dir = dir.path().join("static");

        let store: Arc<dyn CatalogStore> = Arc::new(MemoryStore::new());
        let indexer = Indexer::new(store.clone(), config.library.clone());
        let state = Arc::new(AppState::new(config, store));

        Self {
            dir,
            state,
            indexer,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a video of `size` bytes with a recognizable byte pattern
    pub fn add_video(&self, name: &str, size: usize) -> Vec<u8> {
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        std::fs::write(self.path().join(name), &data).unwrap();
        data
    }

    pub fn add_text(&self, name: &str, text: &str) {
        std::fs::write(self.path().join(name), text).unwrap();
    }

    pub fn refresh(&self) {
        self.indexer.refresh().unwrap();
    }

    pub fn entry(&self, file_name: &str) -> CatalogEntry {
        self.state
            .catalog()
            .get_by_file_name(file_name)
            .cloned()
            .unwrap()
    }

    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    pub async fn request(&self, method: Method, uri: &str, range: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(range) = range {
            builder = builder.header("range", range);
        }
        self.router()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Method::GET, uri, None).await
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
