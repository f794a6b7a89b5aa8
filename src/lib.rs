pub mod analyzers;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod readers;
pub mod report;
pub mod utils;

pub use config::ReportConfig;
pub use error::{ProcessingError, Result};
