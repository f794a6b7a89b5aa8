/// Input files, in priority order
pub const DEFAULT_EXCEL_FILE: &str = "sample_data.xlsx";
pub const DEFAULT_CSV_FILE: &str = "sample_data.csv";
pub const DEFAULT_LOGO_FILE: &str = "logo.png";

/// Output files
pub const DEFAULT_TRENDS_CHART: &str = "weather_trends.png";
pub const DEFAULT_DISTRIBUTION_CHART: &str = "temp_distribution.png";
pub const DEFAULT_REPORT_FILE: &str = "automated_weather_report.pdf";

pub const DEFAULT_REPORT_TITLE: &str = "Automated Weather Report";

/// Configuration
pub const DEFAULT_CONFIG_FILE: &str = "weather_report.toml";
pub const CONFIG_ENV_PREFIX: &str = "WEATHER_REPORT";
