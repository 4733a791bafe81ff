pub mod csv_source;
pub mod mysql_source;
pub mod normalize;

use crate::config::Config;
use crate::model::attendance::{RawRow, RecordBatch};
use derive_more::{Display, From};
use sqlx::MySqlPool;

use self::csv_source::CsvSource;
use self::mysql_source::MySqlSource;

/// Source-level failures only. Field-level parse failures never surface here;
/// they degrade to absent values inside `normalize`.
#[derive(Debug, Display, From)]
pub enum SourceError {
    #[display(fmt = "attendance source I/O error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "attendance source CSV error: {}", _0)]
    Csv(csv::Error),
    #[display(fmt = "attendance source database error: {}", _0)]
    Db(sqlx::Error),
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(e) => Some(e),
            SourceError::Csv(e) => Some(e),
            SourceError::Db(e) => Some(e),
        }
    }
}

/// The external tabular source holding the attendance export.
pub enum AttendanceSource {
    Csv(CsvSource),
    MySql(MySqlSource),
}

impl AttendanceSource {
    /// CSV path wins when both are configured.
    pub async fn from_config(config: &Config) -> Self {
        if let Some(path) = &config.csv_source_path {
            return AttendanceSource::Csv(CsvSource::new(path.clone()));
        }

        let url = config
            .database_url
            .as_deref()
            .expect("CSV_SOURCE_PATH or DATABASE_URL must be set");
        let pool = MySqlPool::connect(url)
            .await
            .expect("Failed to connect to database");

        AttendanceSource::MySql(MySqlSource::new(pool, config.attendance_table.clone()))
    }

    pub async fn fetch(&self) -> Result<Vec<RawRow>, SourceError> {
        match self {
            AttendanceSource::Csv(source) => source.fetch(),
            AttendanceSource::MySql(source) => source.fetch().await,
        }
    }

    /// Fetch and normalize in one step. Zero rows is not an error; the caller
    /// decides how to present an empty batch.
    pub async fn load(&self) -> Result<RecordBatch, SourceError> {
        Ok(normalize::normalize(self.fetch().await?))
    }
}
