use serde::{Deserialize, Serialize};

use super::observation::Metric;

/// Aggregate figures for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    /// Arithmetic mean of the present values; `None` when the column has none.
    pub mean: Option<f64>,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MetricSummary {
    pub fn label(&self) -> &'static str {
        self.metric.summary_label()
    }

    pub fn units(&self) -> &'static str {
        self.metric.units()
    }

    /// Mean formatted to two decimals, `n/a` when undefined.
    pub fn formatted_mean(&self) -> String {
        format_value(self.mean)
    }
}

/// Means of temperature, humidity and wind speed, always in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_rows: usize,
    entries: Vec<MetricSummary>,
}

impl SummaryStatistics {
    pub fn new(total_rows: usize, entries: Vec<MetricSummary>) -> Self {
        Self {
            total_rows,
            entries,
        }
    }

    pub fn entries(&self) -> &[MetricSummary] {
        &self.entries
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricSummary> {
        self.entries.iter().find(|e| e.metric == metric)
    }

    pub fn mean(&self, metric: Metric) -> Option<f64> {
        self.get(metric).and_then(|e| e.mean)
    }

    /// Console rendering used by the `summary` command.
    pub fn detailed_summary(&self) -> String {
        let mut out = format!("Summary Statistics ({} rows)\n", self.total_rows);
        out.push_str(&format!(
            "{:<22} {:>10} {:>6} {:>8} {:>10} {:>10}\n",
            "Metric", "Value", "Units", "Count", "Min", "Max"
        ));
        for entry in &self.entries {
            out.push_str(&format!(
                "{:<22} {:>10} {:>6} {:>8} {:>10} {:>10}\n",
                entry.label(),
                entry.formatted_mean(),
                entry.units(),
                entry.count,
                format_value(entry.min),
                format_value(entry.max),
            ));
        }
        out
    }
}

pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_mean() {
        let entry = MetricSummary {
            metric: Metric::Humidity,
            mean: Some(64.3333333),
            count: 3,
            min: Some(60.0),
            max: Some(70.0),
        };
        assert_eq!(entry.formatted_mean(), "64.33");
        assert_eq!(format_value(None), "n/a");
    }

    #[test]
    fn test_detailed_summary_lists_every_metric() {
        let stats = SummaryStatistics::new(
            0,
            Metric::ALL
                .iter()
                .map(|&metric| MetricSummary {
                    metric,
                    mean: None,
                    count: 0,
                    min: None,
                    max: None,
                })
                .collect(),
        );
        let text = stats.detailed_summary();
        assert!(text.contains("Average Temperature"));
        assert!(text.contains("Average Wind Speed"));
        assert!(text.contains("n/a"));
    }
}
