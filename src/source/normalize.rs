use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use crate::model::attendance::{AttendanceRecord, RawRow, RecordBatch, columns};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];

/// Type the raw rows. Cardinality is preserved: one record out per row in,
/// whatever the row looks like. Rows with a missing employee id are kept here;
/// dropping them is a policy applied by the cache refresh, not by this layer.
pub fn normalize(raw_rows: Vec<RawRow>) -> RecordBatch {
    let mut columns_seen = HashSet::new();
    for row in &raw_rows {
        for key in row.keys() {
            columns_seen.insert(key.clone());
        }
    }

    let records = raw_rows.into_iter().map(normalize_row).collect();

    RecordBatch {
        records,
        columns: columns_seen,
    }
}

fn normalize_row(row: RawRow) -> AttendanceRecord {
    AttendanceRecord {
        empid: row
            .get(columns::EMPID)
            .map(|v| v.trim().to_string())
            .unwrap_or_default(),
        first_name: text_field(&row, columns::FIRST_NAME),
        last_name: text_field(&row, columns::LAST_NAME),
        gender: text_field(&row, columns::GENDER),
        log_date: row.get(columns::LOG_DATE).and_then(|v| parse_log_date(v)),
        user_type: text_field(&row, columns::USER_TYPE),
        first_in_time: text_field(&row, columns::FIRST_IN),
        last_out_time: text_field(&row, columns::LAST_OUT),
        work_hours: row.get(columns::WORK_HOURS).and_then(|v| parse_work_hours(v)),
        day_status: text_field(&row, columns::DAY_STATUS),
        total_in_out: row
            .get(columns::TOTAL_IN_OUT)
            .and_then(|v| v.trim().parse::<i64>().ok()),
        leave_status: text_field(&row, columns::LEAVE_STATUS),
    }
}

/// Missing column stays `None`; a present-but-blank cell stays `Some("")` so
/// the empty string remains a matchable category value.
fn text_field(row: &RawRow, name: &str) -> Option<String> {
    row.get(name).map(|v| v.trim().to_string())
}

/// Permissive calendar-date parser. Datetime layouts are truncated to their
/// date; anything unrecognized becomes `None`, never an error.
pub fn parse_log_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    None
}

/// Decimal hours. Unparseable and non-finite input both count as absent.
pub fn parse_work_hours(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
