//! Shared query parameter types for API handlers.
//!
//! Every list endpoint takes an explicit typed options struct, validated
//! before it reaches the query engine. `status`/`priority` default to the
//! `"all"` sentinel (no filter); `search` is trimmed and an empty string is
//! treated exactly like an omitted parameter.

use serde::Deserialize;
use taskdeck_core::error::CoreError;
use taskdeck_core::pagination::{clamp_limit, clamp_offset, normalize_search};
use taskdeck_core::status::{parse_filter, Priority, FILTER_ALL};

use crate::error::AppError;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped (limit, offset) pair.
    pub fn clamped(&self) -> (i64, i64) {
        (clamp_limit(self.limit), clamp_offset(self.offset))
    }
}

/// Query parameters for filtered entity listings
/// (`?limit=&offset=&search=&status=&priority=`).
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    #[serde(default = "all")]
    pub status: Option<String>,
    #[serde(default = "all")]
    pub priority: Option<String>,
}

fn all() -> Option<String> {
    Some(FILTER_ALL.to_string())
}

impl ListParams {
    /// Clamped (limit, offset) pair.
    pub fn clamped(&self) -> (i64, i64) {
        (clamp_limit(self.limit), clamp_offset(self.offset))
    }

    /// Normalized search term (trimmed; empty means omitted).
    pub fn search(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }

    /// Validate the status filter against the given vocabulary; the `"all"`
    /// sentinel (and an absent parameter) means no filter.
    pub fn status_filter(
        &self,
        parse: fn(&str) -> Option<&'static str>,
    ) -> Result<Option<String>, AppError> {
        filter_value(self.status.as_deref(), parse)
    }

    /// Validate the priority filter; the `"all"` sentinel means no filter.
    pub fn priority_filter(&self) -> Result<Option<String>, AppError> {
        filter_value(self.priority.as_deref(), |s| {
            Priority::parse(s).map(Priority::as_str)
        })
    }
}

fn filter_value(
    value: Option<&str>,
    parse: fn(&str) -> Option<&'static str>,
) -> Result<Option<String>, AppError> {
    match value {
        None => Ok(None),
        Some(v) => parse_filter(v, parse)
            .map(|opt| opt.map(str::to_string))
            .map_err(|msg| AppError::Core(CoreError::Validation(msg))),
    }
}
