use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDateTime;
use tracing::debug;

use super::schema::{parse_datetime, parse_numeric, ColumnIndex};
use crate::error::{ProcessingError, Result};
use crate::models::{Metric, Observation, ObservationTable};

/// Reads the first worksheet of a workbook; its first row is the header.
pub struct ExcelObservationReader;

impl ExcelObservationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: &Path) -> Result<ObservationTable> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ProcessingError::EmptyWorkbook(path.to_path_buf()))??;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(header_text).collect(),
            None => Vec::new(),
        };
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut observations = Vec::new();
        for (index, row) in rows.enumerate() {
            let line = index + 2;
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            observations.push(parse_row(row, &columns, line)?);
        }

        debug!(rows = observations.len(), path = %path.display(), "parsed workbook observations");
        Ok(ObservationTable::new(observations))
    }
}

impl Default for ExcelObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn parse_row(row: &[Data], columns: &ColumnIndex, line: usize) -> Result<Observation> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);
    let numeric = |metric: Metric| numeric_cell(cell(columns.metric(metric)), line, metric);

    Ok(Observation::new(
        datetime_cell(cell(columns.datetime), line)?,
        numeric(Metric::Temperature)?,
        numeric(Metric::Humidity)?,
        numeric(Metric::WindSpeed)?,
    ))
}

fn numeric_cell(cell: &Data, line: usize, metric: Metric) -> Result<Option<f64>> {
    match cell {
        Data::Empty => Ok(None),
        Data::Float(v) if v.is_finite() => Ok(Some(*v)),
        Data::Int(v) => Ok(Some(*v as f64)),
        Data::String(s) => parse_numeric(s, line, metric.column_name()),
        other => Err(ProcessingError::InvalidValue {
            row: line,
            column: metric.column_name().to_string(),
            value: other.to_string(),
        }),
    }
}

fn datetime_cell(cell: &Data, line: usize) -> Result<NaiveDateTime> {
    match cell {
        Data::String(s) => parse_datetime(s, line),
        other => other
            .as_datetime()
            .ok_or_else(|| ProcessingError::InvalidValue {
                row: line,
                column: super::schema::DATETIME_COLUMN.to_string(),
                value: other.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_numeric_cells() {
        assert_eq!(numeric_cell(&Data::Float(12.5), 2, Metric::Temperature).unwrap(), Some(12.5));
        assert_eq!(numeric_cell(&Data::Int(40), 2, Metric::Humidity).unwrap(), Some(40.0));
        assert_eq!(numeric_cell(&Data::Empty, 2, Metric::Humidity).unwrap(), None);
        assert_eq!(
            numeric_cell(&Data::String(" 3.5".to_string()), 2, Metric::WindSpeed).unwrap(),
            Some(3.5)
        );
        assert!(numeric_cell(&Data::Bool(true), 5, Metric::WindSpeed).is_err());
    }

    #[test]
    fn test_datetime_from_text_cell() {
        let parsed = datetime_cell(&Data::String("2024-02-29 23:00:00".to_string()), 2).unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap()
        );
        assert!(datetime_cell(&Data::Empty, 9).is_err());
    }

    #[test]
    fn test_parse_row_with_short_row() {
        let columns = ColumnIndex {
            datetime: 0,
            temperature: 1,
            humidity: 2,
            wind_speed: 3,
        };
        let row = vec![
            Data::String("2024-01-01 06:00".to_string()),
            Data::Float(-2.0),
        ];
        let obs = parse_row(&row, &columns, 2).unwrap();
        assert_eq!(obs.temperature, Some(-2.0));
        assert_eq!(obs.humidity, None);
        assert_eq!(obs.wind_speed, None);
    }

    #[test]
    fn test_unreadable_workbook_is_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"not a zip archive").unwrap();
        let result = ExcelObservationReader::new().read_path(file.path());
        assert!(matches!(result, Err(ProcessingError::Excel(_))));
    }
}
