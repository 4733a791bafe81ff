use csv::ReaderBuilder;
use std::fs::File;

use super::SourceError;
use crate::model::attendance::RawRow;

/// Reads the attendance export from a CSV file (e.g. a sheet download).
pub struct CsvSource {
    path: String,
}

impl CsvSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn fetch(&self) -> Result<Vec<RawRow>, SourceError> {
        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();
            // Short rows are tolerated; the missing trailing cells simply
            // never make it into the map.
            for (idx, header) in headers.iter().enumerate() {
                if let Some(value) = record.get(idx) {
                    row.insert(header.to_string(), value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }
}
