pub mod distribution;
pub mod observation;
pub mod summary;

pub use distribution::{TemperatureBin, TemperatureDistribution, TEMPERATURE_BIN_EDGES};
pub use observation::{Metric, Observation, ObservationTable};
pub use summary::{MetricSummary, SummaryStatistics};
