use std::path::{Path, PathBuf};

use crate::error::{ProcessingError, Result};

/// Which candidate input file was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Excel(PathBuf),
    Csv(PathBuf),
}

impl DataSource {
    pub fn path(&self) -> &Path {
        match self {
            DataSource::Excel(path) | DataSource::Csv(path) => path,
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            DataSource::Excel(_) => "Excel",
            DataSource::Csv(_) => "CSV",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.format_name(), self.path().display())
    }
}

/// Pick the workbook if it exists, otherwise the CSV file.
pub fn locate_source(excel_path: &Path, csv_path: &Path) -> Result<DataSource> {
    if excel_path.is_file() {
        Ok(DataSource::Excel(excel_path.to_path_buf()))
    } else if csv_path.is_file() {
        Ok(DataSource::Csv(csv_path.to_path_buf()))
    } else {
        Err(ProcessingError::NoInputData {
            candidates: vec![excel_path.to_path_buf(), csv_path.to_path_buf()],
        })
    }
}
