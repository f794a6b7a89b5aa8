use tracing::debug;

use crate::models::{Metric, MetricSummary, ObservationTable, SummaryStatistics};

pub struct WeatherAnalyzer;

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Mean, count and extremes of each numeric column. Missing values are skipped.
    pub fn calculate_statistics(&self, table: &ObservationTable) -> SummaryStatistics {
        let entries = Metric::ALL
            .iter()
            .map(|&metric| summarize(metric, table.values(metric)))
            .collect();

        let stats = SummaryStatistics::new(table.len(), entries);
        debug!(
            rows = stats.total_rows,
            avg_temp = ?stats.mean(Metric::Temperature),
            avg_humidity = ?stats.mean(Metric::Humidity),
            avg_wind = ?stats.mean(Metric::WindSpeed),
            "statistics calculated"
        );
        stats
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(metric: Metric, values: impl Iterator<Item = f64>) -> MetricSummary {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        sum += value;
        count += 1;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return MetricSummary {
            metric,
            mean: None,
            count,
            min: None,
            max: None,
        };
    }

    MetricSummary {
        metric,
        mean: Some(sum / count as f64),
        count,
        min: Some(min),
        max: Some(max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::{NaiveDate, NaiveDateTime};

    fn hour(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 7, 15)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("mean should be defined");
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "{} != {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_means_match_arithmetic_mean() {
        let temps = [12.5, 14.0, 17.25, 19.0, 21.75];
        let humidity = [80.0, 75.0, 70.0, 65.0, 60.0];
        let wind = [3.1, 2.9, 4.4, 5.0, 1.2];
        let rows = (0..5)
            .map(|i| Observation::new(hour(i as u32), Some(temps[i]), Some(humidity[i]), Some(wind[i])))
            .collect();
        let table = ObservationTable::new(rows);

        let stats = WeatherAnalyzer::new().calculate_statistics(&table);

        assert_eq!(stats.total_rows, 5);
        assert_close(stats.mean(Metric::Temperature), temps.iter().sum::<f64>() / 5.0);
        assert_close(stats.mean(Metric::Humidity), 70.0);
        assert_close(stats.mean(Metric::WindSpeed), wind.iter().sum::<f64>() / 5.0);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let table = ObservationTable::new(vec![
            Observation::new(hour(0), Some(10.0), None, Some(2.0)),
            Observation::new(hour(1), None, None, Some(4.0)),
            Observation::new(hour(2), Some(20.0), None, None),
        ]);

        let stats = WeatherAnalyzer::new().calculate_statistics(&table);
        let temp = stats.get(Metric::Temperature).unwrap();

        assert_close(temp.mean, 15.0);
        assert_eq!(temp.count, 2);
        assert_eq!(temp.min, Some(10.0));
        assert_eq!(temp.max, Some(20.0));
        assert_eq!(stats.mean(Metric::Humidity), None);
        assert_close(stats.mean(Metric::WindSpeed), 3.0);
    }

    #[test]
    fn test_empty_table_has_undefined_means() {
        let stats = WeatherAnalyzer::new().calculate_statistics(&ObservationTable::default());

        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.entries().len(), 3);
        for entry in stats.entries() {
            assert_eq!(entry.mean, None);
            assert_eq!(entry.count, 0);
            assert_eq!(entry.formatted_mean(), "n/a");
        }
    }

    #[test]
    fn test_entries_keep_fixed_order() {
        let stats = WeatherAnalyzer::new().calculate_statistics(&ObservationTable::default());
        let labels: Vec<_> = stats.entries().iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec!["Average Temperature", "Average Humidity", "Average Wind Speed"]
        );
    }
}
