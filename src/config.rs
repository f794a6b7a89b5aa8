use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILE, DEFAULT_CSV_FILE, DEFAULT_DISTRIBUTION_CHART,
    DEFAULT_EXCEL_FILE, DEFAULT_LOGO_FILE, DEFAULT_REPORT_FILE, DEFAULT_REPORT_TITLE,
    DEFAULT_TRENDS_CHART,
};

/// Input and output locations for one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    pub excel_path: PathBuf,
    pub csv_path: PathBuf,
    pub logo_path: PathBuf,
    pub output_dir: PathBuf,

    #[validate(length(min = 1))]
    pub trends_chart: String,

    #[validate(length(min = 1))]
    pub distribution_chart: String,

    #[validate(length(min = 1))]
    pub report_file: String,

    #[validate(length(min = 1))]
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            excel_path: PathBuf::from(DEFAULT_EXCEL_FILE),
            csv_path: PathBuf::from(DEFAULT_CSV_FILE),
            logo_path: PathBuf::from(DEFAULT_LOGO_FILE),
            output_dir: PathBuf::from("."),
            trends_chart: DEFAULT_TRENDS_CHART.to_string(),
            distribution_chart: DEFAULT_DISTRIBUTION_CHART.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

impl ReportConfig {
    /// Defaults, then the TOML file, then `WEATHER_REPORT_*` environment variables.
    ///
    /// An explicit `config_file` must exist; the default `weather_report.toml` is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config: ReportConfig = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn trends_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.trends_chart)
    }

    pub fn distribution_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.distribution_chart)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn with_inputs(mut self, excel: Option<PathBuf>, csv: Option<PathBuf>) -> Self {
        if let Some(excel) = excel {
            self.excel_path = excel;
        }
        if let Some(csv) = csv {
            self.csv_path = csv;
        }
        self
    }

    pub fn with_outputs(mut self, logo: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(logo) = logo {
            self.logo_path = logo;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}
