use dv_infer::{batch_infer, infer};
use dv_model::{Direction, MeasurementCategory, ScaleType};
use dv_standards::{CategoryRule, CompiledPattern, InstrumentSignature, RuleRepository, UnitRule};
use proptest::prelude::*;

fn sample_rules() -> RuleRepository {
    RuleRepository {
        categories: vec![CategoryRule {
            category: MeasurementCategory::Time,
            keywords: vec!["time".to_string()],
            suffixes: Vec::new(),
            patterns: Vec::new(),
        }],
        units: vec![UnitRule {
            unit: "s".to_string(),
            patterns: vec![CompiledPattern::compile("^s$").unwrap()],
            category: MeasurementCategory::Time,
        }],
        instruments: vec![InstrumentSignature {
            name: "NASA-TLX".to_string(),
            aliases: vec!["tlx".to_string()],
            category: MeasurementCategory::Likert,
            scale: "1-21".to_string(),
            scale_type: ScaleType::Ordinal,
            direction: Direction::LowerIsBetter,
        }],
    }
}

#[test]
fn caller_threshold_overrides_the_engine_flag() {
    let rules = sample_rules();
    let labels = vec!["Task Completion Time (s)".to_string()];
    let items = batch_infer(&labels, 0.9, &rules);

    assert_eq!(items.len(), 1);
    assert!(items[0].needs_review);
    assert!(!items[0].meta.needs_review);
}

#[test]
fn high_threshold_flags_even_instrument_matches() {
    let rules = sample_rules();
    let labels = vec!["NASA-TLX Score".to_string()];
    let items = batch_infer(&labels, 0.96, &rules);

    assert_eq!(items[0].meta.confidence, 0.95);
    assert!(items[0].needs_review);
}

#[test]
fn threshold_at_the_fallback_floor_flags_nothing() {
    let rules = sample_rules();
    let labels = vec![
        "xyz_unrelated_field".to_string(),
        "Task Completion Time (s)".to_string(),
        "NASA-TLX Score".to_string(),
    ];
    let items = batch_infer(&labels, 0.3, &rules);

    assert!(items.iter().all(|item| !item.needs_review));
}

#[test]
fn output_preserves_input_order() {
    let rules = sample_rules();
    let labels = vec![
        "NASA-TLX Score".to_string(),
        "Task Completion Time (s)".to_string(),
        "xyz_unrelated_field".to_string(),
    ];
    let items = batch_infer(&labels, 0.7, &rules);

    let echoed: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(
        echoed,
        vec![
            "NASA-TLX Score",
            "Task Completion Time (s)",
            "xyz_unrelated_field",
        ]
    );
}

#[test]
fn batch_metadata_matches_single_inference() {
    let rules = sample_rules();
    let labels = vec![
        "Task Completion Time (s)".to_string(),
        "NASA-TLX Score".to_string(),
    ];
    let items = batch_infer(&labels, 0.5, &rules);

    for item in &items {
        assert_eq!(item.meta, infer(&item.label, &rules));
    }
}

proptest! {
    #[test]
    fn review_flag_tracks_the_threshold(label in ".{0,40}", threshold in 0.0f32..=1.0f32) {
        let rules = sample_rules();
        let labels = vec![label];
        let items = batch_infer(&labels, threshold, &rules);
        prop_assert_eq!(items[0].needs_review, items[0].meta.confidence < threshold);
    }

    #[test]
    fn inference_is_deterministic(label in ".{0,40}") {
        let rules = sample_rules();
        prop_assert_eq!(infer(&label, &rules), infer(&label, &rules));
    }
}
