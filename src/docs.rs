use crate::api::report::{ReportResponse, ReportRow};
use crate::model::attendance::AttendanceRecord;
use crate::report::classify::{DisplayStatus, WorkHourBucket};
use crate::report::summary::{BucketCount, ReportSummary, StatusCount};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Dashboard API",
        version = "1.0.0",
        description = r#"
## Attendance Reporting Dashboard

This API serves a **row-per-day attendance export** as a filterable, classified report.

### 🔹 Key Features
- **Filtered report**
  - Search by employee first name or id, bound by an inclusive date range, and
    narrow by day status / leave status / user type multi-selects
- **Row classification**
  - Every row carries a work-hour bucket (NA / FULL / PARTIAL / LOW) and a
    display status (leave dominates day status)
- **CSV download**
  - The export is byte-for-byte the filtered view shown on screen
- **Summary counts**
  - Per-status and per-bucket totals over the filtered view

### 📦 Response Format
- JSON-based RESTful responses
- CSV attachment for the export surface

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::report::report,
        crate::api::report::export_csv,
        crate::api::report::summary,
    ),
    components(
        schemas(
            AttendanceRecord,
            ReportRow,
            ReportResponse,
            ReportSummary,
            StatusCount,
            BucketCount,
            WorkHourBucket,
            DisplayStatus
        )
    ),
    tags(
        (name = "Report", description = "Attendance reporting APIs"),
    )
)]
pub struct ApiDoc;
