use anyhow::Result;
use csv::WriterBuilder;

use super::classify::classify;
use crate::model::attendance::AttendanceRecord;

/// Display-column order for the download surface. The derived bucket rides
/// along as "Work Hours Status"; everything else mirrors the table.
pub const EXPORT_HEADERS: [&str; 13] = [
    "Emp ID",
    "First Name",
    "Last Name",
    "Gender",
    "Log Date",
    "User Type",
    "First In",
    "Last Out",
    "Work Hours",
    "Work Hours Status",
    "Day Status",
    "Total In/Out",
    "Leave Status",
];

/// UTF-8, comma-delimited, header row first. Contents are exactly the
/// filtered rows handed in, so the download always matches the screen.
pub fn write_csv(rows: &[AttendanceRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for record in rows {
        writer.write_record(&[
            record.empid.clone(),
            opt(&record.first_name),
            opt(&record.last_name),
            opt(&record.gender),
            record
                .log_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            opt(&record.user_type),
            opt(&record.first_in_time),
            opt(&record.last_out_time),
            record
                .work_hours
                .map(|h| h.to_string())
                .unwrap_or_default(),
            classify(record).to_string(),
            opt(&record.day_status),
            record
                .total_in_out
                .map(|n| n.to_string())
                .unwrap_or_default(),
            opt(&record.leave_status),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(empid: &str) -> AttendanceRecord {
        AttendanceRecord {
            empid: empid.to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
            gender: Some("F".to_string()),
            log_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            user_type: Some("Staff".to_string()),
            first_in_time: Some("09:00".to_string()),
            last_out_time: Some("18:00".to_string()),
            work_hours: Some(8.5),
            day_status: Some("Full Day".to_string()),
            total_in_out: Some(2),
            leave_status: Some(String::new()),
        }
    }

    #[test]
    fn header_row_comes_first_in_display_order() {
        let bytes = write_csv(&[]).expect("write");
        let text = String::from_utf8(bytes).expect("utf-8");
        assert_eq!(
            text.lines().next().unwrap(),
            "Emp ID,First Name,Last Name,Gender,Log Date,User Type,First In,Last Out,\
             Work Hours,Work Hours Status,Day Status,Total In/Out,Leave Status"
        );
    }

    #[test]
    fn rows_carry_values_and_the_derived_bucket() {
        let bytes = write_csv(&[record("E1")]).expect("write");
        let text = String::from_utf8(bytes).expect("utf-8");
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "E1,Alice,,F,2024-01-01,Staff,09:00,18:00,8.5,Full,Full Day,2,"
        );
    }

    #[test]
    fn absent_fields_serialize_as_empty_cells() {
        let mut r = record("E2");
        r.work_hours = None;
        r.log_date = None;
        r.total_in_out = None;

        let bytes = write_csv(&[r]).expect("write");
        let text = String::from_utf8(bytes).expect("utf-8");
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "E2,Alice,,F,,Staff,09:00,18:00,,NA,Full Day,,");
    }

    #[test]
    fn export_preserves_row_order() {
        let bytes = write_csv(&[record("E3"), record("E1"), record("E2")]).expect("write");
        let text = String::from_utf8(bytes).expect("utf-8");
        let firsts: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(firsts, vec!["E3", "E1", "E2"]);
    }
}
