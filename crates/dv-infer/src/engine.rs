//! Measurement inference engine.
//!
//! Classifies a free-text DV label into measurement metadata against a
//! rule repository. Instrument signatures are decisive; a trailing unit
//! marker contributes strong evidence; keyword/suffix/pattern scoring
//! decides the rest. Pure: one label plus one repository in, one
//! metadata value out, no caching between calls.

use dv_model::{Direction, MeasurementCategory, MeasurementMeta, MetaOrigin};
use dv_standards::{InstrumentSignature, RuleRepository};

/// Confidence for a decisive instrument signature match.
const INSTRUMENT_CONFIDENCE: f32 = 0.95;
/// Confidence when nothing matched at all.
const FALLBACK_CONFIDENCE: f32 = 0.3;
/// Cutoff for the engine's own review flag.
const REVIEW_THRESHOLD: f32 = 0.7;
/// Cap for scored inference, below the instrument tier.
const SCORED_CONFIDENCE_CAP: f32 = 0.9;
/// Score contributed by a matched trailing unit marker.
const UNIT_SCORE: f32 = 2.0;
/// Score contributed per keyword substring hit.
const KEYWORD_SCORE: f32 = 1.0;
/// Score contributed per suffix hit (stronger indicator).
const SUFFIX_SCORE: f32 = 2.0;
/// Score contributed per regex pattern hit.
const PATTERN_SCORE: f32 = 1.5;

/// Evidence accumulated for one label.
#[derive(Debug, Default)]
struct Evidence {
    /// Per-category totals in first-seen order. The unit category is
    /// entered before keyword scoring runs, so it wins score ties.
    scores: Vec<(MeasurementCategory, f32)>,
    unit: Option<String>,
    rules: Vec<String>,
}

impl Evidence {
    fn add_score(&mut self, category: MeasurementCategory, amount: f32) {
        if let Some(entry) = self.scores.iter_mut().find(|(c, _)| *c == category) {
            entry.1 += amount;
        } else {
            self.scores.push((category, amount));
        }
    }

    /// Highest-scoring category; earliest entry wins ties.
    fn best(&self) -> Option<(MeasurementCategory, f32)> {
        let mut best: Option<(MeasurementCategory, f32)> = None;
        for &(category, score) in &self.scores {
            let beats = match best {
                Some((_, top)) => score > top,
                None => true,
            };
            if beats {
                best = Some((category, score));
            }
        }
        best
    }
}

/// Classify one label against the rule repository.
///
/// Accepts any string. Labels that match nothing fall back to
/// `Continuous` at low confidence rather than failing; the caller
/// decides what to do with flagged results.
pub fn infer(label: &str, rules: &RuleRepository) -> MeasurementMeta {
    let normalized = label.trim().to_lowercase();

    // Priority 1: instrument signatures are decisive. First hit in
    // repository order returns immediately.
    for instrument in &rules.instruments {
        if instrument_matches(instrument, &normalized) {
            return MeasurementMeta {
                category: instrument.category,
                primary_unit: instrument.scale.clone(),
                allowed_units: vec![instrument.scale.clone()],
                scale_type: instrument.scale_type,
                direction: instrument.direction,
                confidence: INSTRUMENT_CONFIDENCE,
                origin: MetaOrigin::Inferred,
                matched_rules: vec![format!("instrument:{}", instrument.name)],
                needs_review: false,
            };
        }
    }

    let mut evidence = Evidence::default();

    // Priority 2: a trailing parenthesized unit marker, e.g. "Time (s)".
    // Non-terminal; its category score accumulates with step 3.
    if let Some(marker) = trailing_unit_marker(label) {
        let marker_lower = marker.to_lowercase();
        let marker_norm = marker_lower.trim();
        let matched = rules
            .units
            .iter()
            .find(|unit| unit.patterns.iter().any(|p| p.is_match(marker_norm)));
        if let Some(unit) = matched {
            evidence.unit = Some(unit.unit.clone());
            evidence.add_score(unit.category, UNIT_SCORE);
            evidence.rules.push(format!("unit_marker:({marker})"));
        }
    }

    // Priority 3: keyword, suffix, and pattern evidence per category.
    // Provenance records every hit, not only the winner's.
    for rule in &rules.categories {
        for keyword in &rule.keywords {
            if normalized.contains(keyword.as_str()) {
                evidence.add_score(rule.category, KEYWORD_SCORE);
                evidence.rules.push(format!("keyword:{keyword}"));
            }
        }
        for suffix in &rule.suffixes {
            if normalized.ends_with(suffix.as_str()) {
                evidence.add_score(rule.category, SUFFIX_SCORE);
                evidence.rules.push(format!("suffix:{suffix}"));
            }
        }
        for pattern in &rule.patterns {
            if pattern.is_match(&normalized) {
                evidence.add_score(rule.category, PATTERN_SCORE);
                evidence.rules.push(format!("pattern:{}", pattern.source));
            }
        }
    }

    let (category, confidence) = match evidence.best() {
        Some((category, score)) => (category, (0.5 + score * 0.1).min(SCORED_CONFIDENCE_CAP)),
        None => (MeasurementCategory::Continuous, FALLBACK_CONFIDENCE),
    };

    let (primary_unit, allowed_units) = match evidence.unit {
        Some(unit) => (unit.clone(), vec![unit]),
        None => ("varies".to_string(), Vec::new()),
    };

    MeasurementMeta {
        category,
        primary_unit,
        allowed_units,
        scale_type: category.default_scale_type(),
        direction: Direction::Neutral,
        confidence,
        origin: MetaOrigin::Inferred,
        matched_rules: evidence.rules,
        needs_review: confidence < REVIEW_THRESHOLD,
    }
}

fn instrument_matches(instrument: &InstrumentSignature, normalized_label: &str) -> bool {
    if normalized_label.contains(&instrument.name.to_lowercase()) {
        return true;
    }
    instrument
        .aliases
        .iter()
        .any(|alias| normalized_label.contains(&alias.to_lowercase()))
}

/// Extract the content of a trailing parenthesized group, if any.
///
/// Matches only when the parenthetical closes the raw label
/// (`"Time (s)"`, not `"Time (s) raw"`) and its content is non-empty
/// with no closing parenthesis of its own.
fn trailing_unit_marker(label: &str) -> Option<&str> {
    let rest = label.strip_suffix(')')?;
    let open = rest.rfind('(')?;
    let content = &rest[open + 1..];
    if content.is_empty() || content.contains(')') {
        return None;
    }
    Some(content)
}
