use serde::Serialize;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use super::classify::{DisplayStatus, WorkHourBucket, classify, row_status};
use crate::model::attendance::AttendanceRecord;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: DisplayStatus,
    #[schema(example = 12)]
    pub rows: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BucketCount {
    pub bucket: WorkHourBucket,
    #[schema(example = 7)]
    pub rows: usize,
}

/// Status and bucket counts over a filtered view. Derived solely through
/// `row_status`/`classify`, so every rendering surface agrees with the table.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportSummary {
    #[schema(example = 42)]
    pub total: usize,
    pub statuses: Vec<StatusCount>,
    pub buckets: Vec<BucketCount>,
}

pub fn summarize(rows: &[AttendanceRecord]) -> ReportSummary {
    let statuses = DisplayStatus::iter()
        .map(|status| StatusCount {
            status,
            rows: rows.iter().filter(|r| row_status(r) == status).count(),
        })
        .collect();

    let buckets = WorkHourBucket::iter()
        .map(|bucket| BucketCount {
            bucket,
            rows: rows.iter().filter(|r| classify(r) == bucket).count(),
        })
        .collect();

    ReportSummary {
        total: rows.len(),
        statuses,
        buckets,
    }
}
