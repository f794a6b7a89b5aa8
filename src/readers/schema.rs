use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ProcessingError, Result};
use crate::models::Metric;

pub const DATETIME_COLUMN: &str = "Datetime";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub datetime: usize,
    pub temperature: usize,
    pub humidity: usize,
    pub wind_speed: usize,
}

impl ColumnIndex {
    /// Resolve the required columns, failing with every missing name at once.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let found: Vec<String> = headers.iter().map(|h| h.as_ref().trim().to_string()).collect();
        let position = |name: &str| found.iter().position(|h| h == name);

        let required = [
            DATETIME_COLUMN,
            Metric::Temperature.column_name(),
            Metric::Humidity.column_name(),
            Metric::WindSpeed.column_name(),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|&&name| position(name).is_none())
            .map(|&name| name.to_string())
            .collect();

        match (
            position(required[0]),
            position(required[1]),
            position(required[2]),
            position(required[3]),
        ) {
            (Some(datetime), Some(temperature), Some(humidity), Some(wind_speed)) => Ok(Self {
                datetime,
                temperature,
                humidity,
                wind_speed,
            }),
            _ => Err(ProcessingError::SchemaMismatch { missing, found }),
        }
    }

    pub fn metric(&self, metric: Metric) -> usize {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::WindSpeed => self.wind_speed,
        }
    }
}

/// Parse a numeric cell. Empty means missing; anything else that is not a number is an error.
///
/// `row` is the 1-based line in the source file, header included.
pub fn parse_numeric(raw: &str, row: usize, column: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| ProcessingError::InvalidValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

pub fn parse_datetime(raw: &str, row: usize) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ProcessingError::InvalidValue {
            row,
            column: DATETIME_COLUMN.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolves_columns_in_any_order() -> Result<()> {
        let headers = ["Wind Speed", " Datetime ", "Station", "Humidity", "Temperature"];
        let index = ColumnIndex::from_headers(&headers)?;
        assert_eq!(
            index,
            ColumnIndex {
                datetime: 1,
                temperature: 4,
                humidity: 3,
                wind_speed: 0,
            }
        );
        assert_eq!(index.metric(Metric::WindSpeed), 0);
        Ok(())
    }

    #[test]
    fn test_reports_all_missing_columns() {
        let headers = ["Datetime", "Temp", "Humidity"];
        match ColumnIndex::from_headers(&headers) {
            Err(ProcessingError::SchemaMismatch { missing, found }) => {
                assert_eq!(missing, vec!["Temperature".to_string(), "Wind Speed".to_string()]);
                assert_eq!(found.len(), 3);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(" 21.5 ", 2, "Temperature").unwrap(), Some(21.5));
        assert_eq!(parse_numeric("", 2, "Temperature").unwrap(), None);
        assert_eq!(parse_numeric("-3", 2, "Temperature").unwrap(), Some(-3.0));

        let err = parse_numeric("warm", 7, "Temperature").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'warm' in column 'Temperature' at row 7"
        );
        assert!(parse_numeric("NaN", 3, "Humidity").is_err());
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-03-09 14:30:00", 2).unwrap(), expected);
        assert_eq!(parse_datetime("2024-03-09T14:30:00", 2).unwrap(), expected);
        assert_eq!(parse_datetime("2024-03-09 14:30", 2).unwrap(), expected);
        assert_eq!(parse_datetime("09/03/2024 14:30", 2).unwrap(), expected);
        assert_eq!(
            parse_datetime("2024-03-09", 2).unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_datetime("yesterday", 4).is_err());
        assert!(parse_datetime("", 4).is_err());
    }
}
