use std::ops::Range;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use plotters::prelude::*;
use tracing::info;

use super::{chart_error, CAPTION_FONT_FAMILY};
use crate::error::Result;
use crate::models::{Metric, ObservationTable};

pub const TREND_CHART_SIZE: (u32, u32) = (1000, 500);

struct TrendStyle;

impl TrendStyle {
    const MARGIN: i32 = 15;
    const CAPTION_FONT_SIZE: i32 = 26;
    const LABEL_FONT_SIZE: i32 = 14;
    const X_LABEL_AREA_SIZE: u32 = 130;
    const Y_LABEL_AREA_SIZE: u32 = 60;
    const X_LABEL_COUNT: usize = 12;
    const MARKER_SIZE: i32 = 4;
    const ORANGE: RGBColor = RGBColor(255, 165, 0);
    const BLUE: RGBColor = RGBColor(31, 119, 180);
    const GREEN: RGBColor = RGBColor(0, 128, 0);

    fn color(metric: Metric) -> RGBColor {
        match metric {
            Metric::Temperature => Self::ORANGE,
            Metric::Humidity => Self::BLUE,
            Metric::WindSpeed => Self::GREEN,
        }
    }

    fn legend(metric: Metric) -> String {
        format!("{} ({})", metric.column_name(), metric.units())
    }
}

/// Line chart of all three metrics against time, written as PNG to `path`.
pub fn render_trend_chart(table: &ObservationTable, path: &Path) -> Result<()> {
    let (x_range, y_range) = axis_ranges(table);

    let root = BitMapBackend::new(path, TREND_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error("background fill"))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(TrendStyle::MARGIN)
        .caption(
            "Weather Trends Over Time",
            (CAPTION_FONT_FAMILY, TrendStyle::CAPTION_FONT_SIZE),
        )
        .x_label_area_size(TrendStyle::X_LABEL_AREA_SIZE)
        .y_label_area_size(TrendStyle::Y_LABEL_AREA_SIZE)
        .build_cartesian_2d(x_range, y_range)
        .map_err(chart_error("chart build"))?;

    chart
        .configure_mesh()
        .x_labels(TrendStyle::X_LABEL_COUNT)
        .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%Y-%m-%d %H:%M").to_string())
        .x_label_style(
            (CAPTION_FONT_FAMILY, TrendStyle::LABEL_FONT_SIZE)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Datetime")
        .y_desc("Values")
        .draw()
        .map_err(chart_error("mesh draw"))?;

    for metric in Metric::ALL {
        let color = TrendStyle::color(metric);
        let points: Vec<(DateTime<Utc>, f64)> = table
            .series(metric)
            .into_iter()
            .map(|(dt, v)| (as_utc(dt), v))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(chart_error("series draw"))?
            .label(TrendStyle::legend(metric))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        let size = TrendStyle::MARKER_SIZE;
        let style = color.filled();
        let markers = match metric {
            Metric::Temperature => chart
                .draw_series(points.iter().map(|&p| Circle::new(p, size, style)))
                .map(|_| ()),
            Metric::Humidity => chart
                .draw_series(points.iter().map(|&p| {
                    EmptyElement::at(p) + Rectangle::new([(-size, -size), (size, size)], style)
                }))
                .map(|_| ()),
            Metric::WindSpeed => chart
                .draw_series(points.iter().map(|&p| TriangleMarker::new(p, size + 1, style)))
                .map(|_| ()),
        };
        markers.map_err(chart_error("marker draw"))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(chart_error("legend draw"))?;

    root.present().map_err(chart_error("present"))?;
    info!(path = %path.display(), "trend chart written");
    Ok(())
}

fn as_utc(dt: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(dt, Utc)
}

/// Axis extents covering every plotted value, widened when degenerate.
pub(crate) fn axis_ranges(table: &ObservationTable) -> (Range<DateTime<Utc>>, Range<f64>) {
    let (mut x_start, mut x_end) = match table.time_span() {
        Some((first, last)) => (as_utc(first), as_utc(last)),
        None => {
            let epoch = as_utc(NaiveDateTime::default());
            (epoch, epoch)
        }
    };
    if x_start == x_end {
        x_start -= Duration::hours(1);
        x_end += Duration::hours(1);
    }

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for metric in Metric::ALL {
        for value in table.values(metric) {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }
    if !y_min.is_finite() {
        (y_min, y_max) = (0.0, 1.0);
    }
    let pad = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        1.0
    };

    (x_start..x_end, (y_min - pad)..(y_max + pad))
}
