//! Stage composition: load, analyze, render charts, build the document.
//!
//! Each stage takes its inputs explicitly; nothing is written before the
//! input has been loaded and validated.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::info;

use crate::analyzers::{bin_temperatures, WeatherAnalyzer};
use crate::charts::{render_distribution_chart, render_trend_chart};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::models::{SummaryStatistics, TemperatureDistribution, TEMPERATURE_BIN_EDGES};
use crate::readers::{load_observations, DataSource, LoadedData};
use crate::report::{build_report, load_logo, ChartPlacement, DocumentSummary, ReportTemplate};
use crate::utils::ProgressReporter;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub source: DataSource,
    pub statistics: SummaryStatistics,
    pub distribution: TemperatureDistribution,
    pub trends_chart: PathBuf,
    pub distribution_chart: PathBuf,
    pub document: DocumentSummary,
}

/// Locate and parse the observation file named by `config`.
pub fn load(config: &ReportConfig) -> Result<LoadedData> {
    load_observations(&config.excel_path, &config.csv_path)
}

/// Statistics and temperature bins for a loaded table.
pub fn analyze(data: &LoadedData) -> (SummaryStatistics, TemperatureDistribution) {
    let statistics = WeatherAnalyzer::new().calculate_statistics(&data.table);
    let distribution = bin_temperatures(&data.table, &TEMPERATURE_BIN_EDGES);
    (statistics, distribution)
}

/// Render both charts and the PDF for already-loaded data.
pub fn render_report(
    config: &ReportConfig,
    data: &LoadedData,
    generated_at: NaiveDateTime,
    progress: &ProgressReporter,
) -> Result<ReportArtifacts> {
    progress.set_message("Calculating statistics...");
    let (statistics, distribution) = analyze(data);

    std::fs::create_dir_all(&config.output_dir)?;

    progress.set_message("Rendering charts...");
    let trends_chart = config.trends_chart_path();
    render_trend_chart(&data.table, &trends_chart)?;
    let distribution_chart = config.distribution_chart_path();
    render_distribution_chart(&distribution, &distribution_chart)?;

    progress.set_message("Building PDF report...");
    let template = ReportTemplate::new(config.title.as_str(), generated_at)
        .with_logo(load_logo(&config.logo_path));
    let charts = [
        ChartPlacement::trends(&trends_chart),
        ChartPlacement::distribution(&distribution_chart),
    ];
    let document = build_report(&statistics, &charts, template, &config.report_path())?;

    info!(
        source = %data.source,
        pages = document.pages,
        "report pipeline complete"
    );

    Ok(ReportArtifacts {
        source: data.source.clone(),
        statistics,
        distribution,
        trends_chart,
        distribution_chart,
        document,
    })
}

/// Load then render in one call.
pub fn run_pipeline(config: &ReportConfig, generated_at: NaiveDateTime) -> Result<ReportArtifacts> {
    let data = load(config)?;
    render_report(config, &data, generated_at, &ProgressReporter::silent())
}
