use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One weather reading. Numeric fields are `None` where the source cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub datetime: NaiveDateTime,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl Observation {
    pub fn new(
        datetime: NaiveDateTime,
        temperature: Option<f64>,
        humidity: Option<f64>,
        wind_speed: Option<f64>,
    ) -> Self {
        Self {
            datetime,
            temperature,
            humidity,
            wind_speed,
        }
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::WindSpeed => self.wind_speed,
        }
    }
}

/// The three numeric columns of the observation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::WindSpeed];

    /// Column header as it appears in the input files.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::WindSpeed => "Wind Speed",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::WindSpeed => "m/s",
        }
    }

    pub fn summary_label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Average Temperature",
            Metric::Humidity => "Average Humidity",
            Metric::WindSpeed => "Average Wind Speed",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Rows in file order. Built once by a reader, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Present (non-missing) values of one column, in row order.
    pub fn values(&self, metric: Metric) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.value(metric))
    }

    /// `(datetime, value)` pairs for one column, skipping missing values.
    pub fn series(&self, metric: Metric) -> Vec<(NaiveDateTime, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.value(metric).map(|v| (row.datetime, v)))
            .collect()
    }

    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.rows.iter().map(|r| r.datetime).min()?;
        let last = self.rows.iter().map(|r| r.datetime).max()?;
        Some((first, last))
    }
}
