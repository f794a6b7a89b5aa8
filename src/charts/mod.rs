pub mod distribution_chart;
pub mod trend_chart;

pub use distribution_chart::render_distribution_chart;
pub use trend_chart::render_trend_chart;

use crate::error::ProcessingError;

pub(crate) const CAPTION_FONT_FAMILY: &str = "sans-serif";

/// Plotters drawing errors are generic over the backend; keep their debug text.
pub(crate) fn chart_error<E: std::fmt::Debug>(stage: &'static str) -> impl FnOnce(E) -> ProcessingError {
    move |error| ProcessingError::Chart(format!("{}: {:?}", stage, error))
}
