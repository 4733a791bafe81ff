use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

/// Raw row as fetched from the tabular source, before any typing.
pub type RawRow = HashMap<String, String>;

/// Column names as they appear in the attendance export.
pub mod columns {
    pub const EMPID: &str = "empid";
    pub const FIRST_NAME: &str = "employee_fname";
    pub const LAST_NAME: &str = "employee_lname";
    pub const GENDER: &str = "gender";
    pub const LOG_DATE: &str = "log_date";
    pub const USER_TYPE: &str = "user_type";
    pub const FIRST_IN: &str = "first_in_time";
    pub const LAST_OUT: &str = "last_out_time";
    pub const WORK_HOURS: &str = "work_hours";
    pub const DAY_STATUS: &str = "day_status";
    pub const TOTAL_IN_OUT: &str = "total_in_out";
    pub const LEAVE_STATUS: &str = "leave_status";
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// One attendance row: one employee, one day.
pub struct AttendanceRecord {
    #[schema(example = "1024")]
    pub empid: String,
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    pub gender: Option<String>,
    /// Calendar day the row tracks. `None` when the source value did not parse;
    /// such rows never match a bounded date range.
    #[schema(example = "2024-01-01", format = "date", value_type = Option<String>)]
    pub log_date: Option<NaiveDate>,
    pub user_type: Option<String>,
    /// Raw time-of-day strings from the punch device, not validated.
    #[schema(example = "09:02")]
    pub first_in_time: Option<String>,
    #[schema(example = "18:11")]
    pub last_out_time: Option<String>,
    /// Hours worked. `None` when absent or unparseable; negative values are
    /// kept as-is since the source never validates them.
    #[schema(example = 8.5)]
    pub work_hours: Option<f64>,
    #[schema(example = "Full Day")]
    pub day_status: Option<String>,
    #[schema(example = 4)]
    pub total_in_out: Option<i64>,
    #[schema(example = "YES")]
    pub leave_status: Option<String>,
}

/// One normalized load of the source: the records plus the set of columns the
/// source actually provided. A filter dimension whose column is missing here
/// is skipped entirely rather than silently matching nothing.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub records: Vec<AttendanceRecord>,
    pub columns: HashSet<String>,
}

impl RecordBatch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }
}
