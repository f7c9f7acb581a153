//! Offset/limit pagination arithmetic shared by every list endpoint.
//!
//! The continuation token is `next_offset = offset + limit`, handed out only
//! while more rows exist. There is no cursor on a stable sort key, so
//! concurrent inserts can shift page boundaries; that is an accepted
//! tradeoff, not a bug.

/// Default page size when the caller sends no `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit to `[1, MAX_LIMIT]`, defaulting to
/// [`DEFAULT_LIMIT`].
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a caller-supplied offset to `>= 0`, defaulting to 0.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Compute the continuation offset: `Some(offset + limit)` while more rows
/// remain, `None` once `offset + limit >= total_count`.
pub fn next_offset(offset: i64, limit: i64, total_count: i64) -> Option<i64> {
    if offset + limit < total_count {
        Some(offset + limit)
    } else {
        None
    }
}

/// Normalize a search parameter: trim whitespace, and treat an empty string
/// the same as an omitted parameter.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    match search {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}
