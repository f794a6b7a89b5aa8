use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use super::{chart_error, CAPTION_FONT_FAMILY};
use crate::error::Result;
use crate::models::TemperatureDistribution;

pub const DISTRIBUTION_CHART_SIZE: (u32, u32) = (600, 600);

const START_ANGLE: f64 = 140.0;
const TITLE_FONT_SIZE: i32 = 24;
const LABEL_FONT_SIZE: i32 = 16;

/// ColorBrewer Pastel1 qualitative palette.
const PASTEL1: [RGBColor; 9] = [
    RGBColor(251, 180, 174),
    RGBColor(179, 205, 227),
    RGBColor(204, 235, 197),
    RGBColor(222, 203, 228),
    RGBColor(254, 217, 166),
    RGBColor(255, 255, 204),
    RGBColor(229, 216, 189),
    RGBColor(253, 218, 236),
    RGBColor(242, 242, 242),
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PieSlice {
    pub label: String,
    pub size: f64,
    pub color: RGBColor,
}

/// Non-empty bins as pie slices. Colours follow bin order so a bin keeps its colour across runs.
pub(crate) fn pie_slices(distribution: &TemperatureDistribution) -> Vec<PieSlice> {
    distribution
        .bins
        .iter()
        .enumerate()
        .filter(|(_, bin)| bin.count > 0)
        .map(|(i, bin)| PieSlice {
            label: bin.label(),
            size: bin.count as f64,
            color: PASTEL1[i % PASTEL1.len()],
        })
        .collect()
}

/// Pie chart of the binned temperatures, written as PNG to `path`.
pub fn render_distribution_chart(distribution: &TemperatureDistribution, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, DISTRIBUTION_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error("background fill"))?;
    let area = root
        .titled(
            "Temperature Range Distribution",
            (CAPTION_FONT_FAMILY, TITLE_FONT_SIZE),
        )
        .map_err(chart_error("title draw"))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let slices = pie_slices(distribution);

    if slices.is_empty() {
        let style = TextStyle::from((CAPTION_FONT_FAMILY, LABEL_FONT_SIZE).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new("No temperature data", center, style))
            .map_err(chart_error("notice draw"))?;
    } else {
        let radius = f64::from(width.min(height)) * 0.35;
        let sizes: Vec<f64> = slices.iter().map(|s| s.size).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|s| s.color).collect();
        let labels: Vec<String> = slices.iter().map(|s| s.label.clone()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE);
        pie.label_style((CAPTION_FONT_FAMILY, LABEL_FONT_SIZE).into_font().color(&BLACK));
        pie.percentages((CAPTION_FONT_FAMILY, LABEL_FONT_SIZE).into_font().color(&BLACK));
        area.draw(&pie).map_err(chart_error("pie draw"))?;
    }

    root.present().map_err(chart_error("present"))?;
    info!(path = %path.display(), slices = slices.len(), "distribution chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureBin;

    fn distribution(counts: &[usize]) -> TemperatureDistribution {
        TemperatureDistribution {
            bins: counts
                .iter()
                .enumerate()
                .map(|(i, &count)| TemperatureBin {
                    lower: -10.0 + 10.0 * i as f64,
                    upper: 10.0 * i as f64,
                    count,
                })
                .collect(),
            out_of_range: 0,
        }
    }

    #[test]
    fn test_empty_bins_are_omitted() {
        let slices = pie_slices(&distribution(&[3, 0, 5, 0, 1]));
        let labels: Vec<_> = slices.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(labels, vec!["(-10, 0]", "(10, 20]", "(30, 40]"]);
        assert_eq!(slices[1].size, 5.0);
    }

    #[test]
    fn test_colours_follow_bin_position() {
        let slices = pie_slices(&distribution(&[0, 2, 0, 0, 4]));
        assert_eq!(slices[0].color, PASTEL1[1]);
        assert_eq!(slices[1].color, PASTEL1[4]);
    }

    #[test]
    fn test_no_slices_without_data() {
        assert!(pie_slices(&distribution(&[0, 0, 0, 0, 0])).is_empty());
    }
}
