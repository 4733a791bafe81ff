use chrono::NaiveDate;
use std::collections::HashSet;

use crate::model::attendance::RecordBatch;

/// One render cycle's worth of user constraints. Built from the query string,
/// dropped after the view is produced.
///
/// `None` on a categorical field means the filter is inactive (pass-through);
/// `Some` with an empty set means strict multi-select semantics: nothing
/// passes that dimension.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub day_status: Option<HashSet<String>>,
    pub leave_status: Option<HashSet<String>>,
    pub user_type: Option<HashSet<String>>,
}

impl FilterCriteria {
    /// Comma-separated multi-select value. Blank entries are discarded, so an
    /// empty or all-whitespace parameter yields the empty set.
    pub fn parse_selection(raw: &str) -> HashSet<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Activate a categorical filter only when the user supplied one AND the
    /// source actually has that column; a dimension the source never provided
    /// must be a no-op pass-through, not a hidden zero-match filter.
    pub fn selection_for(
        raw: Option<&str>,
        batch: &RecordBatch,
        column: &str,
    ) -> Option<HashSet<String>> {
        let raw = raw?;
        if !batch.has_column(column) {
            return None;
        }
        Some(Self::parse_selection(raw))
    }
}
