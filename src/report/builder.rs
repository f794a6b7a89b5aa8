use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use image::DynamicImage;
use tracing::{info, warn};

use super::fonts::{pt_to_mm, FontFace};
use super::layout::{Align, CellFlow, CellStyle, PageCanvas, PageLayout, PageTemplate, RgbColor};
use crate::error::Result;
use crate::models::SummaryStatistics;

const BRAND_BLUE: RgbColor = RgbColor(0, 51, 102);
const TABLE_HEADER_FILL: RgbColor = RgbColor(200, 220, 255);
const TABLE_BAND_FILL: RgbColor = RgbColor(235, 245, 255);
const FOOTER_GREY: RgbColor = RgbColor(128, 128, 128);

const LOGO_X_MM: f32 = 10.0;
const LOGO_Y_MM: f32 = 8.0;
const LOGO_WIDTH_MM: f32 = 33.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const TABLE_FONT_SIZE: f32 = 12.0;

/// Branding drawn on every page: logo, title and timestamp on top, page number below.
pub struct ReportTemplate {
    title: String,
    generated_at: NaiveDateTime,
    logo: Option<DynamicImage>,
}

impl ReportTemplate {
    pub fn new(title: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            generated_at,
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: Option<DynamicImage>) -> Self {
        self.logo = logo;
        self
    }

    pub fn timestamp_line(&self) -> String {
        format!(
            "Report generated on: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl PageTemplate for ReportTemplate {
    fn header(&self, canvas: &mut PageCanvas) -> Result<()> {
        if let Some(logo) = &self.logo {
            canvas.image_at(logo, LOGO_X_MM, LOGO_Y_MM, LOGO_WIDTH_MM)?;
        }
        canvas.cell(
            0.0,
            LINE_HEIGHT_MM,
            &self.title,
            CellStyle::text(FontFace::Bold, 16.0)
                .color(BRAND_BLUE)
                .align(Align::Center),
            CellFlow::NextLine,
        );
        canvas.cell(
            0.0,
            LINE_HEIGHT_MM,
            &self.timestamp_line(),
            CellStyle::text(FontFace::Regular, 10.0)
                .color(BRAND_BLUE)
                .align(Align::Center),
            CellFlow::NextLine,
        );
        canvas.ln(5.0);
        Ok(())
    }

    fn footer(&self, canvas: &mut PageCanvas) -> Result<()> {
        canvas.set_y(-15.0);
        let text = format!("Page {}", canvas.page_number());
        canvas.cell(
            0.0,
            LINE_HEIGHT_MM,
            &text,
            CellStyle::text(FontFace::Oblique, 10.0)
                .color(FOOTER_GREY)
                .align(Align::Center),
            CellFlow::Right,
        );
        Ok(())
    }
}

/// A chart to embed, with where and how wide to draw it.
#[derive(Debug, Clone)]
pub struct ChartPlacement {
    pub path: PathBuf,
    pub caption: String,
    pub missing_text: String,
    pub x_mm: f32,
    pub width_mm: f32,
}

impl ChartPlacement {
    pub fn trends(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            caption: "Weather Trends Over Time:".to_string(),
            missing_text: "Weather Trends image not found.".to_string(),
            x_mm: 10.0,
            width_mm: 190.0,
        }
    }

    pub fn distribution(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            caption: "Temperature Range Distribution:".to_string(),
            missing_text: "Temperature Distribution image not found.".to_string(),
            x_mm: 60.0,
            width_mm: 90.0,
        }
    }
}

/// What the builder produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub charts_embedded: usize,
}

/// Load the branding logo. An absent file is normal; an undecodable one is skipped with a warning.
pub fn load_logo(path: &Path) -> Option<DynamicImage> {
    if !path.is_file() {
        return None;
    }
    match image::open(path) {
        Ok(image) => Some(image),
        Err(error) => {
            warn!(path = %path.display(), %error, "logo could not be decoded, header drawn without it");
            None
        }
    }
}

/// Styled heading: brand-coloured band across the page with white bold text.
pub fn section_title<T: PageTemplate>(layout: &mut PageLayout<T>, title: &str) -> Result<()> {
    layout.cell(
        0.0,
        LINE_HEIGHT_MM,
        title,
        CellStyle::text(FontFace::Bold, 12.0)
            .color(RgbColor::WHITE)
            .fill(BRAND_BLUE),
        CellFlow::NextLine,
    )
}

/// Metric/Value/Units table with a shaded header and banded rows.
pub fn summary_table<T: PageTemplate>(
    layout: &mut PageLayout<T>,
    stats: &SummaryStatistics,
) -> Result<()> {
    let line_height = pt_to_mm(TABLE_FONT_SIZE) * 2.5;
    let col_width = layout.content_width() / 3.0;
    let base = CellStyle::text(FontFace::Regular, TABLE_FONT_SIZE).bordered();

    let header = base.fill(TABLE_HEADER_FILL);
    layout.cell(col_width, line_height, "Metric", header, CellFlow::Right)?;
    layout.cell(col_width, line_height, "Value", header, CellFlow::Right)?;
    layout.cell(col_width, line_height, "Units", header, CellFlow::NextLine)?;

    for (i, entry) in stats.entries().iter().enumerate() {
        let fill = if i % 2 == 1 {
            TABLE_BAND_FILL
        } else {
            RgbColor::WHITE
        };
        let style = base.fill(fill);
        layout.cell(col_width, line_height, entry.label(), style, CellFlow::Right)?;
        layout.cell(
            col_width,
            line_height,
            &entry.formatted_mean(),
            style,
            CellFlow::Right,
        )?;
        layout.cell(col_width, line_height, entry.units(), style, CellFlow::NextLine)?;
    }
    Ok(())
}

/// Caption plus image when the chart file exists, otherwise a single placeholder line.
pub fn chart_block<T: PageTemplate>(
    layout: &mut PageLayout<T>,
    chart: &ChartPlacement,
) -> Result<bool> {
    let text = CellStyle::text(FontFace::Regular, TABLE_FONT_SIZE);
    if !chart.path.is_file() {
        layout.cell(0.0, LINE_HEIGHT_MM, &chart.missing_text, text, CellFlow::NextLine)?;
        return Ok(false);
    }

    let image = image::open(&chart.path)?;
    layout.cell(0.0, LINE_HEIGHT_MM, &chart.caption, text, CellFlow::NextLine)?;
    layout.image(&image, chart.x_mm, chart.width_mm)?;
    Ok(true)
}

/// Lay out the full report and write it to `output`.
pub fn build_report(
    stats: &SummaryStatistics,
    charts: &[ChartPlacement],
    template: ReportTemplate,
    output: &Path,
) -> Result<DocumentSummary> {
    let title = template.title.clone();
    let mut layout = PageLayout::new(&title, template)?;
    layout.add_page()?;

    section_title(&mut layout, "Summary Statistics")?;
    summary_table(&mut layout, stats)?;

    layout.ln(10.0);
    section_title(&mut layout, "Visualizations")?;

    let mut charts_embedded = 0;
    for (i, chart) in charts.iter().enumerate() {
        if i > 0 {
            layout.ln(10.0);
        }
        if chart_block(&mut layout, chart)? {
            charts_embedded += 1;
        }
    }

    let pages = layout.save(output)?;
    info!(path = %output.display(), pages, charts_embedded, "report document written");

    Ok(DocumentSummary {
        path: output.to_path_buf(),
        pages,
        charts_embedded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::WeatherAnalyzer;
    use crate::models::{Observation, ObservationTable};
    use chrono::NaiveDate;
    use image::RgbImage;
    use tempfile::TempDir;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 2)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn sample_stats() -> SummaryStatistics {
        let table = ObservationTable::new(vec![
            Observation::new(generated_at(), Some(11.0), Some(70.0), Some(3.0)),
            Observation::new(generated_at(), Some(13.0), Some(60.0), Some(5.0)),
        ]);
        WeatherAnalyzer::new().calculate_statistics(&table)
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_timestamp_line() {
        let template = ReportTemplate::new("Automated Weather Report", generated_at());
        assert_eq!(template.timestamp_line(), "Report generated on: 2024-04-02 09:15:00");
    }

    #[test]
    fn test_missing_charts_use_placeholders() -> Result<()> {
        let dir = TempDir::new()?;
        let output = dir.path().join("report.pdf");
        let charts = [
            ChartPlacement::trends(dir.path().join("weather_trends.png")),
            ChartPlacement::distribution(dir.path().join("temp_distribution.png")),
        ];

        let summary = build_report(
            &sample_stats(),
            &charts,
            ReportTemplate::new("Automated Weather Report", generated_at()),
            &output,
        )?;

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.charts_embedded, 0);
        assert!(std::fs::read(&output)?.starts_with(b"%PDF"));
        Ok(())
    }

    #[test]
    fn test_charts_overflow_to_second_page() -> Result<()> {
        let dir = TempDir::new()?;
        let trends = dir.path().join("weather_trends.png");
        let pie = dir.path().join("temp_distribution.png");
        write_png(&trends, 100, 50);
        write_png(&pie, 60, 60);

        let summary = build_report(
            &sample_stats(),
            &[ChartPlacement::trends(&trends), ChartPlacement::distribution(&pie)],
            ReportTemplate::new("Automated Weather Report", generated_at()),
            &dir.path().join("report.pdf"),
        )?;

        assert_eq!(summary.charts_embedded, 2);
        assert_eq!(summary.pages, 2);
        Ok(())
    }

    #[test]
    fn test_logo_loading() -> Result<()> {
        let dir = TempDir::new()?;
        let logo = dir.path().join("logo.png");
        assert!(load_logo(&logo).is_none());

        std::fs::write(&logo, b"not an image")?;
        assert!(load_logo(&logo).is_none());

        write_png(&logo, 33, 10);
        let template =
            ReportTemplate::new("Automated Weather Report", generated_at()).with_logo(load_logo(&logo));
        assert!(template.logo.is_some());

        let summary = build_report(&sample_stats(), &[], template, &dir.path().join("r.pdf"))?;
        assert_eq!(summary.pages, 1);
        Ok(())
    }

    #[test]
    fn test_output_is_overwritten() -> Result<()> {
        let dir = TempDir::new()?;
        let output = dir.path().join("report.pdf");
        std::fs::write(&output, b"stale")?;

        build_report(
            &sample_stats(),
            &[],
            ReportTemplate::new("Automated Weather Report", generated_at()),
            &output,
        )?;
        assert!(std::fs::read(&output)?.starts_with(b"%PDF"));
        Ok(())
    }
}
