//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the catalog, search and watch endpoints
//! - Static page shells and assets
//! - Range-aware video streaming
//! - CORS and request tracing middleware

pub mod handlers;
pub mod routes;
pub mod watch;

pub use routes::create_router;
