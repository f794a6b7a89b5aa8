use serde::{Deserialize, Serialize};

/// Boundaries of the temperature bins in °C. Bins are right-closed: `(lo, hi]`.
pub const TEMPERATURE_BIN_EDGES: [f64; 6] = [-10.0, 0.0, 10.0, 20.0, 30.0, 40.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl TemperatureBin {
    pub fn contains(&self, value: f64) -> bool {
        value > self.lower && value <= self.upper
    }

    /// Interval notation, e.g. `(0, 10]`.
    pub fn label(&self) -> String {
        format!("({}, {}]", self.lower, self.upper)
    }
}

/// Per-bin counts of the temperature column, ordered by lower bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureDistribution {
    pub bins: Vec<TemperatureBin>,
    /// Non-missing readings outside every bin.
    pub out_of_range: usize,
}

impl TemperatureDistribution {
    pub fn binned_total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.binned_total() == 0
    }

    /// Share of binned readings per bin, in percent. All zeros when nothing was binned.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.binned_total();
        self.bins
            .iter()
            .map(|b| {
                if total == 0 {
                    0.0
                } else {
                    b.count as f64 * 100.0 / total as f64
                }
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        let mut out = String::from("Temperature Range Distribution\n");
        for (bin, pct) in self.bins.iter().zip(self.percentages()) {
            out.push_str(&format!("{:<12} {:>6} {:>6.1}%\n", bin.label(), bin.count, pct));
        }
        if self.out_of_range > 0 {
            out.push_str(&format!("{:<12} {:>6}\n", "outside", self.out_of_range));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_is_right_closed() {
        let bin = TemperatureBin {
            lower: 0.0,
            upper: 10.0,
            count: 0,
        };
        assert!(!bin.contains(0.0));
        assert!(bin.contains(0.1));
        assert!(bin.contains(10.0));
        assert!(!bin.contains(10.01));
        assert_eq!(bin.label(), "(0, 10]");
    }

    #[test]
    fn test_percentages_of_empty_distribution() {
        let dist = TemperatureDistribution {
            bins: vec![TemperatureBin {
                lower: -10.0,
                upper: 0.0,
                count: 0,
            }],
            out_of_range: 2,
        };
        assert!(dist.is_empty());
        assert_eq!(dist.percentages(), vec![0.0]);
    }
}
