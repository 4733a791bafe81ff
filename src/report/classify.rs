use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use utoipa::ToSchema;

use crate::model::attendance::AttendanceRecord;

/// Four-bucket classification of the numeric hours field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkHourBucket {
    #[strum(serialize = "NA")]
    Na,
    #[strum(serialize = "Full")]
    Full,
    #[strum(serialize = "Partial")]
    Partial,
    #[strum(serialize = "Low")]
    Low,
}

/// Highlight/status value a row carries on every rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    #[strum(serialize = "On Leave")]
    OnLeave,
    #[strum(serialize = "Full Day")]
    FullDay,
    #[strum(serialize = "Half Day")]
    HalfDay,
    #[strum(serialize = "Miss Punch")]
    MissPunch,
    #[strum(serialize = "")]
    None,
}

/// Pure function of `work_hours`. Checked top-down, first match wins.
pub fn classify(record: &AttendanceRecord) -> WorkHourBucket {
    match record.work_hours {
        None => WorkHourBucket::Na,
        Some(hours) if hours >= 8.0 => WorkHourBucket::Full,
        Some(hours) if hours >= 4.0 => WorkHourBucket::Partial,
        Some(_) => WorkHourBucket::Low,
    }
}

/// Fixed priority: a day marked as leave is definitionally not evaluated for
/// punch completeness, so leave dominates every day status.
pub fn row_status(record: &AttendanceRecord) -> DisplayStatus {
    if record.leave_status.as_deref() == Some("YES") {
        return DisplayStatus::OnLeave;
    }
    match record.day_status.as_deref() {
        Some("Full Day") => DisplayStatus::FullDay,
        Some("Half Day") => DisplayStatus::HalfDay,
        Some("Miss Punch") => DisplayStatus::MissPunch,
        _ => DisplayStatus::None,
    }
}
