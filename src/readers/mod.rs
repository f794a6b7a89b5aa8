pub mod csv_reader;
pub mod data_source;
pub mod excel_reader;
pub mod schema;

pub use csv_reader::CsvObservationReader;
pub use data_source::{locate_source, DataSource};
pub use excel_reader::ExcelObservationReader;
pub use schema::ColumnIndex;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::ObservationTable;

/// The loaded table together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub table: ObservationTable,
    pub source: DataSource,
}

/// Locate the preferred or fallback input and parse it.
pub fn load_observations(excel_path: &Path, csv_path: &Path) -> Result<LoadedData> {
    let source = locate_source(excel_path, csv_path)?;
    info!(source = %source, "loading observations");

    let table = match &source {
        DataSource::Excel(path) => ExcelObservationReader::new().read_path(path)?,
        DataSource::Csv(path) => CsvObservationReader::new().read_path(path)?,
    };

    info!(rows = table.len(), format = source.format_name(), "observations loaded");
    Ok(LoadedData { table, source })
}
