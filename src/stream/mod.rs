//! Range-aware file streaming
//!
//! - `Range` header parsing
//! - Response planning (status, length, `Content-Range`) from a parsed range
//!   and the file size
//! - Streaming a byte window of a file as a response body

pub mod body;
pub mod range;

use axum::http::StatusCode;

pub use body::open_window;
pub use range::{parse_range, RangeRequest};

/// How a request for a file of a given size is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPlan {
    /// Headers only
    Head { total: u64 },
    /// Whole file, 200
    Full { total: u64 },
    /// Inclusive window, 206
    Partial { start: u64, end: u64, total: u64 },
    /// Range starts past the end of the file, 416
    Unsatisfiable { total: u64 },
}

impl StreamPlan {
    pub fn new(range: Option<RangeRequest>, total: u64, head: bool) -> Self {
        if head {
            return StreamPlan::Head { total };
        }
        let Some(range) = range else {
            return StreamPlan::Full { total };
        };

        let start = range.start.unwrap_or(0);
        if start >= total {
            return StreamPlan::Unsatisfiable { total };
        }
        let end = range.end.unwrap_or(total - 1).min(total - 1);
        if start > end {
            return StreamPlan::Unsatisfiable { total };
        }
        StreamPlan::Partial { start, end, total }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            StreamPlan::Head { .. } | StreamPlan::Full { .. } => StatusCode::OK,
            StreamPlan::Partial { .. } => StatusCode::PARTIAL_CONTENT,
            StreamPlan::Unsatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
        }
    }

    /// Value of the `Content-Length` header
    pub fn content_length(&self) -> u64 {
        match *self {
            StreamPlan::Head { total } | StreamPlan::Full { total } => total,
            StreamPlan::Partial { start, end, .. } => end - start + 1,
            StreamPlan::Unsatisfiable { .. } => 0,
        }
    }

    /// Value of the `Content-Range` header, if any
    pub fn content_range(&self) -> Option<String> {
        match *self {
            StreamPlan::Partial { start, end, total } => {
                Some(format!("bytes {}-{}/{}", start, end, total))
            }
            StreamPlan::Unsatisfiable { total } => Some(format!("bytes */{}", total)),
            _ => None,
        }
    }

    /// Byte offset and length to read from the file, `None` when no body is sent
    pub fn window(&self) -> Option<(u64, u64)> {
        match *self {
            StreamPlan::Full { total } => Some((0, total)),
            StreamPlan::Partial { start, end, .. } => Some((start, end - start + 1)),
            _ => None,
        }
    }
}
