use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use super::schema::{parse_datetime, parse_numeric, ColumnIndex};
use crate::error::{ProcessingError, Result};
use crate::models::{Metric, Observation, ObservationTable};

pub struct CsvObservationReader;

impl CsvObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every row of a headed CSV file into an observation table
    pub fn read_path(&self, path: &Path) -> Result<ObservationTable> {
        let file = std::fs::File::open(path).map_err(|source| ProcessingError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<ObservationTable> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers.iter().collect::<Vec<_>>())?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // Line 1 is the header
            let line = index + 2;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            rows.push(self.parse_record(&record, &columns, line)?);
        }

        debug!(rows = rows.len(), "parsed CSV observations");
        Ok(ObservationTable::new(rows))
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &ColumnIndex,
        line: usize,
    ) -> Result<Observation> {
        let field = |idx: usize| record.get(idx).unwrap_or("");
        let numeric = |metric: Metric| {
            parse_numeric(field(columns.metric(metric)), line, metric.column_name())
        };

        Ok(Observation::new(
            parse_datetime(field(columns.datetime), line)?,
            numeric(Metric::Temperature)?,
            numeric(Metric::Humidity)?,
            numeric(Metric::WindSpeed)?,
        ))
    }
}

impl Default for CsvObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
