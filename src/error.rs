use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read input file {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel parsing error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("Neither Excel nor CSV data files found (looked for {})", display_paths(.candidates))]
    NoInputData { candidates: Vec<PathBuf> },

    #[error("Workbook {0} contains no worksheet")]
    EmptyWorkbook(PathBuf),

    #[error("Schema mismatch: missing column(s) {} (found: {})", .missing.join(", "), .found.join(", "))]
    SchemaMismatch {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ProcessingError {
    /// True for failures raised while locating, parsing or validating input data.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            ProcessingError::InputRead { .. }
                | ProcessingError::Csv(_)
                | ProcessingError::Excel(_)
                | ProcessingError::NoInputData { .. }
                | ProcessingError::EmptyWorkbook(_)
                | ProcessingError::SchemaMismatch { .. }
                | ProcessingError::InvalidValue { .. }
        )
    }

    /// Process exit status: 1 for load failures, 2 for everything else.
    pub fn exit_code(&self) -> u8 {
        if self.is_load_failure() {
            1
        } else {
            2
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = ProcessingError::NoInputData {
            candidates: vec![PathBuf::from("a.xlsx"), PathBuf::from("a.csv")],
        };
        assert_eq!(missing.exit_code(), 1);
        assert_eq!(
            missing.to_string(),
            "Neither Excel nor CSV data files found (looked for a.xlsx, a.csv)"
        );

        let chart = ProcessingError::Chart("backend".to_string());
        assert!(!chart.is_load_failure());
        assert_eq!(chart.exit_code(), 2);
    }

    #[test]
    fn test_input_read_is_load_failure_but_plain_io_is_not() {
        let unreadable = ProcessingError::InputRead {
            path: PathBuf::from("sample_data.csv"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(unreadable.exit_code(), 1);
        assert!(unreadable
            .to_string()
            .starts_with("Failed to read input file sample_data.csv"));

        let write_failure = ProcessingError::Io(std::io::ErrorKind::PermissionDenied.into());
        assert!(!write_failure.is_load_failure());
        assert_eq!(write_failure.exit_code(), 2);
    }

    #[test]
    fn test_schema_mismatch_message() {
        let err = ProcessingError::SchemaMismatch {
            missing: vec!["Humidity".to_string()],
            found: vec!["Datetime".to_string(), "Temperature".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch: missing column(s) Humidity (found: Datetime, Temperature)"
        );
        assert_eq!(err.exit_code(), 1);
    }
}
