//! Integration testing module
//!
//! End-to-end tests that index a temporary library and drive the router:
//! - Catalog listing and search
//! - Range, full-file and HEAD streaming
//! - Refresh behaviour as seen through the HTTP API

mod e2e;
mod fixtures;
