pub mod distribution;
pub mod weather_analyzer;

pub use distribution::bin_temperatures;
pub use weather_analyzer::WeatherAnalyzer;
