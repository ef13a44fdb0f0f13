//! `Range` request header parsing

/// Inclusive byte interval requested by a client.
///
/// Either bound may be missing; a missing start means offset 0 and a missing
/// end means the last byte of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeRequest {
    pub start: Option<u64>,
    pub end: Option<u64>,
}

/// Parse a `Range` header value of the form `bytes=<start>-<end>`.
///
/// Only the first range of a multi-range header is used. Anything that does
/// not yield at least one bound is `None`, which means the whole file. An
/// end before the start is dropped, leaving the range open-ended.
pub fn parse_range(header: &str) -> Option<RangeRequest> {
    let spec = header.trim().strip_prefix("bytes=")?;
    let first = spec.split(',').next()?.trim();

    let parts: Vec<&str> = first.split('-').collect();
    if parts.len() != 2 {
        return None;
    }

    let start = parse_bound(parts[0]);
    let end = parse_bound(parts[1]);

    match (start, end) {
        (None, None) => None,
        (Some(s), Some(e)) if s > e => Some(RangeRequest {
            start: Some(s),
            end: None,
        }),
        (start, end) => Some(RangeRequest { start, end }),
    }
}

fn parse_bound(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
