use futures_util::StreamExt;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, MySqlPool, Row};

use super::SourceError;
use crate::model::attendance::RawRow;

/// Reads the attendance export from a MySQL table. Every cell is brought back
/// in string form; typing happens later in `normalize`.
pub struct MySqlSource {
    pool: MySqlPool,
    table: String,
}

impl MySqlSource {
    pub fn new(pool: MySqlPool, table: String) -> Self {
        Self { pool, table }
    }

    pub async fn fetch(&self) -> Result<Vec<RawRow>, SourceError> {
        let sql = format!("SELECT * FROM {}", self.table);

        let mut stream = sqlx::query(&sql).fetch(&self.pool);
        let mut rows = Vec::new();

        while let Some(row) = stream.next().await {
            let row = row?;
            rows.push(row_to_raw(&row));
        }

        Ok(rows)
    }
}

fn row_to_raw(row: &MySqlRow) -> RawRow {
    let mut raw = RawRow::new();
    for column in row.columns() {
        let name = column.name();
        if let Some(value) = column_as_string(row, name) {
            raw.insert(name.to_string(), value);
        }
    }
    raw
}

/// Column types vary per deployment (VARCHAR, DATE, DOUBLE, INT, TIME); take
/// whichever decode succeeds and stringify it. A column that decodes to SQL
/// NULL or to no supported type stays absent from the row.
fn column_as_string(row: &MySqlRow, name: &str) -> Option<String> {
    if let Ok(value) = row.try_get::<Option<String>, _>(name) {
        return value;
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(name) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(name) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<chrono::NaiveTime>, _>(name) {
        return value.map(|v| v.to_string());
    }
    None
}
