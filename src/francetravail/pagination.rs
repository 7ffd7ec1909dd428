//! Pagination metadata carried by the `Content-Range` response header.

use serde::Serialize;

/// Position of a result page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

/// Parses a header of the form `"<unit> <start>-<end>/<total>"`, e.g. `"offres 0-149/3021"`.
///
/// # Returns
///
/// - `Some(Pagination)`: If every part is present and numeric
/// - `None`: For anything else (missing `/`, missing unit, non-numeric bounds, ...)
pub fn parse_content_range(header: &str) -> Option<Pagination> {
    let re = regex::Regex::new(r"^\S+ (\d+)-(\d+)/(\d+)$").ok()?;
    let captures = re.captures(header.trim())?;

    Some(Pagination {
        start: captures.get(1)?.as_str().parse().ok()?,
        end: captures.get(2)?.as_str().parse().ok()?,
        total: captures.get(3)?.as_str().parse().ok()?,
    })
}
