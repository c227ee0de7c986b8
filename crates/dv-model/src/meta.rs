//! Measurement metadata produced by schema resolution and inference.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, MeasurementCategory, ScaleType};

/// Where a measurement definition came from.
///
/// Schema-defined values are ground truth and carry confidence 1.0;
/// inferred values come out of the heuristic engine with whatever
/// confidence it assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaOrigin {
    SchemaDefined,
    Inferred,
}

impl MetaOrigin {
    pub fn is_inferred(&self) -> bool {
        matches!(self, MetaOrigin::Inferred)
    }
}

// Rendered as the `inferred` boolean of the sidecar contract.
impl Serialize for MetaOrigin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_inferred())
    }
}

impl<'de> Deserialize<'de> for MetaOrigin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let inferred = bool::deserialize(deserializer)?;
        Ok(if inferred {
            MetaOrigin::Inferred
        } else {
            MetaOrigin::SchemaDefined
        })
    }
}

/// Measurement metadata for one dependent variable.
///
/// Field declaration order is the sidecar JSON key order; keep it stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementMeta {
    pub category: MeasurementCategory,
    /// Canonical unit name, or `"varies"` when no unit was determined.
    pub primary_unit: String,
    /// Acceptable units in source order; empty when no unit was determined.
    pub allowed_units: Vec<String>,
    pub scale_type: ScaleType,
    pub direction: Direction,
    /// Classification confidence in `[0.0, 1.0]`.
    pub confidence: f32,
    #[serde(rename = "inferred")]
    pub origin: MetaOrigin,
    /// Append-only audit trail of the rules that fired, preserved verbatim.
    pub matched_rules: Vec<String>,
    pub needs_review: bool,
}

impl MeasurementMeta {
    /// Build a ground-truth definition taken from the standard schema.
    ///
    /// Schema-defined metadata is always fully trusted: confidence 1.0,
    /// no review flag, provenance fixed to `schema_defined`.
    pub fn schema_defined(
        category: MeasurementCategory,
        primary_unit: impl Into<String>,
        allowed_units: Vec<String>,
        scale_type: ScaleType,
        direction: Direction,
    ) -> Self {
        Self {
            category,
            primary_unit: primary_unit.into(),
            allowed_units,
            scale_type,
            direction,
            confidence: 1.0,
            origin: MetaOrigin::SchemaDefined,
            matched_rules: vec!["schema_defined".to_string()],
            needs_review: false,
        }
    }

    pub fn is_schema_defined(&self) -> bool {
        !self.origin.is_inferred()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_defined_invariants() {
        let meta = MeasurementMeta::schema_defined(
            MeasurementCategory::Accuracy,
            "%",
            vec!["%".to_string(), "proportion".to_string()],
            ScaleType::Ratio,
            Direction::LowerIsBetter,
        );
        assert!(meta.is_schema_defined());
        assert_eq!(meta.confidence, 1.0);
        assert_eq!(meta.matched_rules, vec!["schema_defined".to_string()]);
        assert!(!meta.needs_review);
    }

    #[test]
    fn test_sidecar_key_order_and_rendering() {
        let meta = MeasurementMeta {
            category: MeasurementCategory::Time,
            primary_unit: "s".to_string(),
            allowed_units: vec!["s".to_string()],
            scale_type: ScaleType::Ratio,
            direction: Direction::Neutral,
            confidence: 0.95,
            origin: MetaOrigin::Inferred,
            matched_rules: vec!["instrument:NASA-TLX".to_string()],
            needs_review: false,
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"category":"Time","primary_unit":"s","allowed_units":["s"],"#,
                r#""scale_type":"ratio","direction":"neutral","confidence":0.95,"#,
                r#""inferred":true,"matched_rules":["instrument:NASA-TLX"],"#,
                r#""needs_review":false}"#
            )
        );
    }

    #[test]
    fn test_origin_deserializes_from_bool() {
        let meta = MeasurementMeta::schema_defined(
            MeasurementCategory::Binary,
            "flag",
            vec!["flag".to_string()],
            ScaleType::Nominal,
            Direction::Neutral,
        );
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""inferred":false"#));
        let round: MeasurementMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(round, meta);
    }
}
