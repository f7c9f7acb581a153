//! Display rules for the task audit trail.
//!
//! Activity rows store human-readable before/after values, not raw ids:
//! absent or empty values display as `"N/A"`, label arrays join with a
//! comma, and assignee ids are resolved to display names by the caller
//! before the change record is built.

/// Placeholder shown for absent or empty values.
pub const NA: &str = "N/A";

/// One audited field change, ready to be persisted as an Activity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Wire-facing field name (e.g. `"status"`, `"startDate"`).
    pub key: &'static str,
    pub previous_value: String,
    pub new_value: String,
}

impl FieldChange {
    /// Build a change record, skipping no-op transitions.
    ///
    /// Returns `None` when the display forms are identical, so callers can
    /// iterate update-payload fields and keep only real changes.
    pub fn new(key: &'static str, previous_value: String, new_value: String) -> Option<Self> {
        if previous_value == new_value {
            return None;
        }
        Some(FieldChange {
            key,
            previous_value,
            new_value,
        })
    }
}

/// Display an optional scalar, substituting `"N/A"` for absent/empty values.
pub fn display_value(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NA.to_string(),
    }
}

/// Display a label array as a comma-separated string, `"N/A"` when empty.
pub fn display_labels(labels: &[String]) -> String {
    if labels.is_empty() {
        NA.to_string()
    } else {
        labels.join(",")
    }
}
