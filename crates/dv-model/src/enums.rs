//! Closed measurement vocabularies.
//!
//! These enums provide compile-time type safety for the measurement
//! values that appear as strings in schema and rules files. Unknown
//! strings are construction-time faults, never silent pass-throughs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad measurement category taxonomy for dependent variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementCategory {
    /// Durations and latencies.
    /// Examples: task completion time, reaction time, dwell time
    Time,

    /// Correctness of responses.
    /// Examples: error rate, error count, percent correct
    Accuracy,

    /// Event tallies.
    /// Examples: click count, number of attempts, fixations
    Count,

    /// Rating-scale responses.
    /// Examples: SUS score, NASA-TLX, 7-point agreement items
    Likert,

    /// Ratios and percentages of a whole.
    /// Examples: success rate, completion percentage
    Proportion,

    /// Two-outcome measures.
    /// Examples: task success, pass/fail
    Binary,

    /// Unbounded continuous quantities not covered above.
    Continuous,

    /// Bodily signals.
    /// Examples: heart rate, skin conductance, pupil diameter
    Physiological,
}

impl MeasurementCategory {
    /// All categories in declaration order.
    pub const ALL: [MeasurementCategory; 8] = [
        MeasurementCategory::Time,
        MeasurementCategory::Accuracy,
        MeasurementCategory::Count,
        MeasurementCategory::Likert,
        MeasurementCategory::Proportion,
        MeasurementCategory::Binary,
        MeasurementCategory::Continuous,
        MeasurementCategory::Physiological,
    ];

    /// Returns the canonical name as it appears in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementCategory::Time => "Time",
            MeasurementCategory::Accuracy => "Accuracy",
            MeasurementCategory::Count => "Count",
            MeasurementCategory::Likert => "Likert",
            MeasurementCategory::Proportion => "Proportion",
            MeasurementCategory::Binary => "Binary",
            MeasurementCategory::Continuous => "Continuous",
            MeasurementCategory::Physiological => "Physiological",
        }
    }

    /// Returns the default scale type for this category.
    ///
    /// Likert responses are ordered categories and binary outcomes are
    /// unordered ones; everything else is measured on a ratio scale.
    /// Inference always uses this default; only a ground-truth schema
    /// entry can override it.
    pub fn default_scale_type(&self) -> ScaleType {
        match self {
            MeasurementCategory::Likert => ScaleType::Ordinal,
            MeasurementCategory::Binary => ScaleType::Nominal,
            MeasurementCategory::Time
            | MeasurementCategory::Accuracy
            | MeasurementCategory::Count
            | MeasurementCategory::Proportion
            | MeasurementCategory::Continuous
            | MeasurementCategory::Physiological => ScaleType::Ratio,
        }
    }
}

impl fmt::Display for MeasurementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeasurementCategory {
    type Err = String;

    /// Parse a category name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "TIME" => Ok(MeasurementCategory::Time),
            "ACCURACY" => Ok(MeasurementCategory::Accuracy),
            "COUNT" => Ok(MeasurementCategory::Count),
            "LIKERT" => Ok(MeasurementCategory::Likert),
            "PROPORTION" => Ok(MeasurementCategory::Proportion),
            "BINARY" => Ok(MeasurementCategory::Binary),
            "CONTINUOUS" => Ok(MeasurementCategory::Continuous),
            "PHYSIOLOGICAL" => Ok(MeasurementCategory::Physiological),
            _ => Err(format!("Unknown measurement category: {s}")),
        }
    }
}

/// Stevens' scale typology for measurement levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    /// Categories without order.
    Nominal,
    /// Ordered categories (e.g. Likert items).
    Ordinal,
    /// Equal intervals, no true zero.
    Interval,
    /// Equal intervals with a true zero.
    Ratio,
}

impl ScaleType {
    /// Returns the lowercase name as it appears in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleType::Nominal => "nominal",
            ScaleType::Ordinal => "ordinal",
            ScaleType::Interval => "interval",
            ScaleType::Ratio => "ratio",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScaleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "NOMINAL" => Ok(ScaleType::Nominal),
            "ORDINAL" => Ok(ScaleType::Ordinal),
            "INTERVAL" => Ok(ScaleType::Interval),
            "RATIO" => Ok(ScaleType::Ratio),
            _ => Err(format!("Unknown scale type: {s}")),
        }
    }
}

/// Interpretation direction for a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
    Neutral,
}

impl Direction {
    /// Returns the snake_case name as it appears in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::HigherIsBetter => "higher_is_better",
            Direction::LowerIsBetter => "lower_is_better",
            Direction::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "HIGHER_IS_BETTER" => Ok(Direction::HigherIsBetter),
            "LOWER_IS_BETTER" => Ok(Direction::LowerIsBetter),
            "NEUTRAL" => Ok(Direction::Neutral),
            _ => Err(format!("Unknown direction: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Time".parse::<MeasurementCategory>().unwrap(),
            MeasurementCategory::Time
        );
        assert_eq!(
            "LIKERT".parse::<MeasurementCategory>().unwrap(),
            MeasurementCategory::Likert
        );
        assert_eq!(
            "physiological".parse::<MeasurementCategory>().unwrap(),
            MeasurementCategory::Physiological
        );
        assert!("Velocity".parse::<MeasurementCategory>().is_err());
    }

    #[test]
    fn test_default_scale_types() {
        assert_eq!(
            MeasurementCategory::Likert.default_scale_type(),
            ScaleType::Ordinal
        );
        assert_eq!(
            MeasurementCategory::Binary.default_scale_type(),
            ScaleType::Nominal
        );
        assert_eq!(
            MeasurementCategory::Time.default_scale_type(),
            ScaleType::Ratio
        );
        assert_eq!(
            MeasurementCategory::Physiological.default_scale_type(),
            ScaleType::Ratio
        );
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(
            "lower_is_better".parse::<Direction>().unwrap(),
            Direction::LowerIsBetter
        );
        assert_eq!("NEUTRAL".parse::<Direction>().unwrap(), Direction::Neutral);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for category in MeasurementCategory::ALL {
            let parsed: MeasurementCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }
}
