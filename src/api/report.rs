use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::{AttendanceRecord, RecordBatch, columns};
use crate::report::classify::{DisplayStatus, WorkHourBucket, classify, row_status};
use crate::report::criteria::FilterCriteria;
use crate::report::export;
use crate::report::pipeline;
use crate::report::summary::{ReportSummary, summarize};
use crate::source::AttendanceSource;
use crate::utils::report_cache::ReportCache;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Case-insensitive substring match against first name or employee id
    #[param(example = "alice")]
    pub search: Option<String>,
    /// Inclusive range start; omit for unbounded
    #[param(example = "2024-01-01", format = "date", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive range end; omit for unbounded
    #[param(example = "2024-01-31", format = "date", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
    /// Comma-separated day status multi-select; present-but-empty selects nothing
    #[param(example = "Full Day,Half Day")]
    pub day_status: Option<String>,
    /// Comma-separated leave status multi-select
    #[param(example = "YES")]
    pub leave_status: Option<String>,
    /// Comma-separated user type multi-select
    #[param(example = "Staff")]
    pub user_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportRow {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub work_hours_status: WorkHourBucket,
    pub row_status: DisplayStatus,
}

impl ReportRow {
    fn new(record: AttendanceRecord) -> Self {
        let work_hours_status = classify(&record);
        let row_status = row_status(&record);
        Self {
            record,
            work_hours_status,
            row_status,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "empid": "1024",
            "first_name": "Alice",
            "log_date": "2024-01-01",
            "work_hours": 8.5,
            "day_status": "Full Day",
            "leave_status": "",
            "work_hours_status": "FULL",
            "row_status": "FULL_DAY"
        }
    ],
    "total": 1
}))]
pub struct ReportResponse {
    pub data: Vec<ReportRow>,
    #[schema(example = 1)]
    pub total: usize,
    /// Set when the source yielded nothing to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// -------------------- Handlers --------------------

/// Filtered, classified attendance view
#[utoipa::path(
    get,
    path = "/api/v1/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Filtered attendance rows with derived statuses", body = ReportResponse),
        (status = 503, description = "Attendance source unavailable")
    ),
    tag = "Report"
)]
pub async fn report(
    source: web::Data<AttendanceSource>,
    cache: web::Data<ReportCache>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let batch = load_batch(&cache, &source).await?;

    if batch.is_empty() {
        return Ok(HttpResponse::Ok().json(ReportResponse {
            data: Vec::new(),
            total: 0,
            message: Some("No data found in attendance source".to_string()),
        }));
    }

    let data: Vec<ReportRow> = filtered_rows(&batch, &query)
        .into_iter()
        .map(ReportRow::new)
        .collect();

    Ok(HttpResponse::Ok().json(ReportResponse {
        total: data.len(),
        data,
        message: None,
    }))
}

/// CSV download of the filtered view
#[utoipa::path(
    get,
    path = "/api/v1/report/export",
    params(ReportQuery),
    responses(
        (status = 200, description = "CSV attachment, identical to the filtered view", body = String, content_type = "text/csv"),
        (status = 503, description = "Attendance source unavailable")
    ),
    tag = "Report"
)]
pub async fn export_csv(
    source: web::Data<AttendanceSource>,
    cache: web::Data<ReportCache>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let batch = load_batch(&cache, &source).await?;
    let rows = filtered_rows(&batch, &query);

    let body = export::write_csv(&rows).map_err(|e| {
        error!(error = %e, "Failed to build CSV export");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"attendance_report.csv\"",
        ))
        .body(body))
}

/// Status and bucket counts over the filtered view
#[utoipa::path(
    get,
    path = "/api/v1/report/summary",
    params(ReportQuery),
    responses(
        (status = 200, description = "Counts per display status and work-hour bucket", body = ReportSummary),
        (status = 503, description = "Attendance source unavailable")
    ),
    tag = "Report"
)]
pub async fn summary(
    source: web::Data<AttendanceSource>,
    cache: web::Data<ReportCache>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let batch = load_batch(&cache, &source).await?;
    let rows = filtered_rows(&batch, &query);

    Ok(HttpResponse::Ok().json(summarize(&rows)))
}

// -------------------- Helpers --------------------

async fn load_batch(
    cache: &ReportCache,
    source: &AttendanceSource,
) -> actix_web::Result<Arc<RecordBatch>> {
    cache.get_or_refresh(source).await.map_err(|e| {
        error!(error = %e, "Attendance source fetch failed");
        actix_web::error::ErrorServiceUnavailable("Attendance source unavailable")
    })
}

fn filtered_rows(batch: &RecordBatch, query: &ReportQuery) -> Vec<AttendanceRecord> {
    let criteria = criteria_from_query(query, batch);
    pipeline::filter(&batch.records, &criteria)
}

fn criteria_from_query(query: &ReportQuery, batch: &RecordBatch) -> FilterCriteria {
    FilterCriteria {
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        start_date: query.start_date,
        end_date: query.end_date,
        day_status: FilterCriteria::selection_for(
            query.day_status.as_deref(),
            batch,
            columns::DAY_STATUS,
        ),
        leave_status: FilterCriteria::selection_for(
            query.leave_status.as_deref(),
            batch,
            columns::LEAVE_STATUS,
        ),
        user_type: FilterCriteria::selection_for(
            query.user_type.as_deref(),
            batch,
            columns::USER_TYPE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::csv_source::CsvSource;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const FIXTURE: &str = "\
empid,employee_fname,employee_lname,log_date,work_hours,day_status,leave_status
E1,Alice,Ahmed,2024-01-01,8.5,Full Day,
E2,Bob,Rahman,2024-01-02,abc,Half Day,YES
";

    fn temp_csv(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "attendance-report-api-{}.csv",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        let mut file = File::create(&path).expect("create temp csv");
        file.write_all(contents.as_bytes()).expect("write temp csv");
        path
    }

    fn fixture_state(contents: &str) -> (Data<AttendanceSource>, Data<ReportCache>) {
        let path = temp_csv(contents);
        let source = Data::new(AttendanceSource::Csv(CsvSource::new(
            path.to_string_lossy().to_string(),
        )));
        let cache = Data::new(ReportCache::new(Duration::from_secs(60)));
        (source, cache)
    }

    #[actix_web::test]
    async fn report_filters_by_date_and_derives_the_bucket() {
        let (source, cache) = fixture_state(FIXTURE);
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report", web::get().to(report)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/report?start_date=2024-01-01&end_date=2024-01-01")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["empid"], "E1");
        assert_eq!(body["data"][0]["work_hours_status"], "FULL");
        assert_eq!(body["data"][0]["row_status"], "FULL_DAY");
    }

    #[actix_web::test]
    async fn leave_status_dominates_day_status_in_the_view() {
        let (source, cache) = fixture_state(FIXTURE);
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report", web::get().to(report)),
        )
        .await;

        let req = test::TestRequest::get().uri("/report").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 2);
        // E2 is marked on leave even though its day status says Half Day, and
        // its unparseable hours bucket as NA rather than failing the request.
        assert_eq!(body["data"][1]["empid"], "E2");
        assert_eq!(body["data"][1]["row_status"], "ON_LEAVE");
        assert_eq!(body["data"][1]["work_hours_status"], "NA");
    }

    #[actix_web::test]
    async fn empty_multi_select_passes_no_rows() {
        let (source, cache) = fixture_state(FIXTURE);
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report", web::get().to(report)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/report?day_status=")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 0);
    }

    #[actix_web::test]
    async fn filter_dimension_missing_from_source_is_a_no_op() {
        let (source, cache) = fixture_state(FIXTURE);
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report", web::get().to(report)),
        )
        .await;

        // The fixture has no user_type column; the filter must pass everything
        // through rather than matching nothing.
        let req = test::TestRequest::get()
            .uri("/report?user_type=Staff")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 2);
    }

    #[actix_web::test]
    async fn export_matches_the_filtered_view() {
        let (source, cache) = fixture_state(FIXTURE);
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report/export", web::get().to(export_csv)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/report/export?start_date=2024-01-01&end_date=2024-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get("Content-Disposition")
                .and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"attendance_report.csv\"")
        );

        let bytes = test::read_body(resp).await;
        let text = String::from_utf8(bytes.to_vec()).expect("utf-8 export");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Emp ID,First Name"));
        assert!(lines[1].starts_with("E1,Alice"));
        assert!(lines[1].contains(",Full,"));
    }

    #[actix_web::test]
    async fn summary_counts_follow_the_same_filters() {
        let (source, cache) = fixture_state(FIXTURE);
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report/summary", web::get().to(summary)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/report/summary?leave_status=YES")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 1);
        let on_leave = body["statuses"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["status"] == "ON_LEAVE")
            .unwrap();
        assert_eq!(on_leave["rows"], 1);
    }

    #[actix_web::test]
    async fn empty_source_reports_nothing_to_show() {
        let (source, cache) = fixture_state("empid,log_date\n");
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report", web::get().to(report)),
        )
        .await;

        let req = test::TestRequest::get().uri("/report").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 0);
        assert_eq!(body["message"], "No data found in attendance source");
    }

    #[actix_web::test]
    async fn unreachable_source_is_reported_not_fatal() {
        let source = Data::new(AttendanceSource::Csv(CsvSource::new("/no/such/export.csv")));
        let cache = Data::new(ReportCache::new(Duration::from_secs(60)));
        let app = test::init_service(
            App::new()
                .app_data(source)
                .app_data(cache)
                .route("/report", web::get().to(report)),
        )
        .await;

        let req = test::TestRequest::get().uri("/report").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
