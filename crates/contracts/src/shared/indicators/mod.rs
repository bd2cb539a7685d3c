use serde::{Deserialize, Serialize};

/// How to format the numeric value of a stat card on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    /// Compact money label with the full value in the tooltip.
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Visual status of a stat card (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    #[default]
    Neutral,
    Warning,
}

impl IndicatorStatus {
    /// Grades a completion percentage: 95%+ good, 75%+ warning, below is bad.
    pub fn from_completion(percent: f64) -> Self {
        if percent >= 95.0 {
            IndicatorStatus::Good
        } else if percent >= 75.0 {
            IndicatorStatus::Warning
        } else {
            IndicatorStatus::Bad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_completion() {
        assert_eq!(IndicatorStatus::from_completion(100.0), IndicatorStatus::Good);
        assert_eq!(IndicatorStatus::from_completion(95.0), IndicatorStatus::Good);
        assert_eq!(IndicatorStatus::from_completion(80.0), IndicatorStatus::Warning);
        assert_eq!(IndicatorStatus::from_completion(10.0), IndicatorStatus::Bad);
    }
}
