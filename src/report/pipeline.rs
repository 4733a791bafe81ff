use std::collections::HashSet;

use super::criteria::FilterCriteria;
use crate::model::attendance::AttendanceRecord;

/// Stable filter: records that pass every active predicate, in their original
/// relative order. Never sorts.
pub fn filter(records: &[AttendanceRecord], criteria: &FilterCriteria) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|record| matches_criteria(record, criteria))
        .cloned()
        .collect()
}

fn matches_criteria(record: &AttendanceRecord, criteria: &FilterCriteria) -> bool {
    matches_search(record, criteria)
        && matches_date_range(record, criteria)
        && matches_selection(record.day_status.as_deref(), criteria.day_status.as_ref())
        && matches_selection(record.leave_status.as_deref(), criteria.leave_status.as_ref())
        && matches_selection(record.user_type.as_deref(), criteria.user_type.as_ref())
}

/// Case-insensitive substring of first name or of the employee id. Last name
/// and every other field stay unsearched.
fn matches_search(record: &AttendanceRecord, criteria: &FilterCriteria) -> bool {
    let Some(search) = &criteria.search else {
        return true;
    };
    let needle = search.to_lowercase();

    record
        .first_name
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .contains(&needle)
        || record.empid.to_lowercase().contains(&needle)
}

/// Inclusive on both ends. A record with an unknown date never matches once
/// any bound is active.
fn matches_date_range(record: &AttendanceRecord, criteria: &FilterCriteria) -> bool {
    if criteria.start_date.is_none() && criteria.end_date.is_none() {
        return true;
    }
    let Some(date) = record.log_date else {
        return false;
    };

    if let Some(start) = criteria.start_date {
        if date < start {
            return false;
        }
    }
    if let Some(end) = criteria.end_date {
        if date > end {
            return false;
        }
    }
    true
}

fn matches_selection(value: Option<&str>, allowed: Option<&HashSet<String>>) -> bool {
    match allowed {
        None => true,
        Some(allowed) => allowed.contains(value.unwrap_or("")),
    }
}
