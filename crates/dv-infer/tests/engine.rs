use dv_infer::infer;
use dv_model::{Direction, MeasurementCategory, MetaOrigin, ScaleType};
use dv_standards::{CategoryRule, CompiledPattern, InstrumentSignature, RuleRepository, UnitRule};

fn sample_rules() -> RuleRepository {
    RuleRepository {
        categories: vec![
            CategoryRule {
                category: MeasurementCategory::Time,
                keywords: vec!["time".to_string(), "latency".to_string()],
                suffixes: vec!["_rt".to_string()],
                patterns: vec![CompiledPattern::compile(r"reaction\s*time").unwrap()],
            },
            CategoryRule {
                category: MeasurementCategory::Count,
                keywords: vec!["error".to_string(), "count".to_string()],
                suffixes: Vec::new(),
                patterns: Vec::new(),
            },
        ],
        units: vec![
            UnitRule {
                unit: "s".to_string(),
                patterns: vec![CompiledPattern::compile(r"^s$|^sec(onds)?$").unwrap()],
                category: MeasurementCategory::Time,
            },
            UnitRule {
                unit: "ms".to_string(),
                patterns: vec![CompiledPattern::compile(r"^ms$").unwrap()],
                category: MeasurementCategory::Time,
            },
            UnitRule {
                unit: "%".to_string(),
                patterns: vec![CompiledPattern::compile(r"^%$|^percent$").unwrap()],
                category: MeasurementCategory::Accuracy,
            },
        ],
        instruments: vec![
            InstrumentSignature {
                name: "NASA-TLX".to_string(),
                aliases: vec!["tlx".to_string(), "nasa tlx".to_string()],
                category: MeasurementCategory::Likert,
                scale: "1-21".to_string(),
                scale_type: ScaleType::Ordinal,
                direction: Direction::LowerIsBetter,
            },
            InstrumentSignature {
                name: "SUS".to_string(),
                aliases: vec!["system usability scale".to_string()],
                category: MeasurementCategory::Likert,
                scale: "0-100".to_string(),
                scale_type: ScaleType::Interval,
                direction: Direction::HigherIsBetter,
            },
        ],
    }
}

#[test]
fn unit_marker_and_keyword_scores_accumulate() {
    let rules = sample_rules();
    let meta = infer("Task Completion Time (s)", &rules);

    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(meta.scale_type, ScaleType::Ratio);
    assert_eq!(meta.direction, Direction::Neutral);
    assert_eq!(meta.primary_unit, "s");
    assert_eq!(meta.allowed_units, vec!["s".to_string()]);
    assert!((meta.confidence - 0.8).abs() < 1e-6);
    assert_eq!(meta.origin, MetaOrigin::Inferred);
    assert_eq!(
        meta.matched_rules,
        vec!["unit_marker:(s)".to_string(), "keyword:time".to_string()]
    );
    assert!(!meta.needs_review);
}

#[test]
fn instrument_signature_is_decisive() {
    let rules = sample_rules();
    let meta = infer("NASA-TLX Score", &rules);

    assert_eq!(meta.category, MeasurementCategory::Likert);
    assert_eq!(meta.scale_type, ScaleType::Ordinal);
    assert_eq!(meta.direction, Direction::LowerIsBetter);
    assert_eq!(meta.primary_unit, "1-21");
    assert_eq!(meta.allowed_units, vec!["1-21".to_string()]);
    assert_eq!(meta.confidence, 0.95);
    assert_eq!(meta.matched_rules, vec!["instrument:NASA-TLX".to_string()]);
    assert!(!meta.needs_review);
}

#[test]
fn instrument_matches_through_alias() {
    let rules = sample_rules();
    let meta = infer("Raw TLX workload", &rules);

    assert_eq!(meta.category, MeasurementCategory::Likert);
    assert_eq!(meta.confidence, 0.95);
    assert_eq!(meta.matched_rules, vec!["instrument:NASA-TLX".to_string()]);
}

#[test]
fn first_matching_instrument_wins() {
    let rules = sample_rules();
    let meta = infer("NASA-TLX vs SUS comparison", &rules);

    assert_eq!(meta.primary_unit, "1-21");
    assert_eq!(meta.matched_rules, vec!["instrument:NASA-TLX".to_string()]);
}

#[test]
fn unmatched_label_falls_back_to_continuous() {
    let rules = sample_rules();
    let meta = infer("xyz_unrelated_field", &rules);

    assert_eq!(meta.category, MeasurementCategory::Continuous);
    assert_eq!(meta.scale_type, ScaleType::Ratio);
    assert_eq!(meta.primary_unit, "varies");
    assert!(meta.allowed_units.is_empty());
    assert_eq!(meta.confidence, 0.3);
    assert!(meta.matched_rules.is_empty());
    assert!(meta.needs_review);
}

#[test]
fn empty_and_whitespace_labels_fall_back() {
    let rules = sample_rules();
    for label in ["", "   "] {
        let meta = infer(label, &rules);
        assert_eq!(meta.category, MeasurementCategory::Continuous);
        assert_eq!(meta.confidence, 0.3);
        assert!(meta.matched_rules.is_empty());
    }
}

#[test]
fn unit_marker_alone_is_not_flagged_for_review() {
    let rules = sample_rules();
    let meta = infer("Dwell (s)", &rules);

    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(meta.primary_unit, "s");
    assert!((meta.confidence - 0.7).abs() < 1e-6);
    assert!(!meta.needs_review);
}

#[test]
fn marker_matching_ignores_case_and_padding() {
    let rules = sample_rules();
    let meta = infer("Dwell ( MS )", &rules);

    assert_eq!(meta.primary_unit, "ms");
    assert_eq!(meta.matched_rules, vec!["unit_marker:( MS )".to_string()]);
}

#[test]
fn unknown_marker_contributes_nothing() {
    let rules = sample_rules();
    let meta = infer("Gaze latency (furlongs)", &rules);

    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(meta.primary_unit, "varies");
    assert_eq!(meta.matched_rules, vec!["keyword:latency".to_string()]);
    assert!(meta.needs_review);
}

#[test]
fn tied_scores_prefer_the_unit_category() {
    let rules = sample_rules();
    // Count collects 2.0 from two keywords; the % marker already put
    // 2.0 on Accuracy, and first-entered wins the tie.
    let meta = infer("Error Count (%)", &rules);

    assert_eq!(meta.category, MeasurementCategory::Accuracy);
    assert_eq!(meta.primary_unit, "%");
    assert_eq!(
        meta.matched_rules,
        vec![
            "unit_marker:(%)".to_string(),
            "keyword:error".to_string(),
            "keyword:count".to_string(),
        ]
    );
}

#[test]
fn tied_category_scores_prefer_repository_order() {
    let rules = sample_rules();
    // One keyword each for Time and Count; Time is listed first.
    let meta = infer("time per error", &rules);

    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(
        meta.matched_rules,
        vec!["keyword:time".to_string(), "keyword:error".to_string()]
    );
}

#[test]
fn provenance_records_hits_for_every_category() {
    let rules = sample_rules();
    let meta = infer("Reaction Time Errors (s)", &rules);

    // Time accumulates 2.0 + 1.0 + 1.5; Count gets 1.0 from "error".
    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(
        meta.matched_rules,
        vec![
            "unit_marker:(s)".to_string(),
            "keyword:time".to_string(),
            r"pattern:reaction\s*time".to_string(),
            "keyword:error".to_string(),
        ]
    );
    assert!((meta.confidence - 0.9).abs() < 1e-6);
}

#[test]
fn suffix_evidence_outweighs_a_single_keyword() {
    let rules = sample_rules();
    let meta = infer("press_error_rt", &rules);

    // Suffix "_rt" scores 2.0 for Time against 1.0 for Count.
    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(
        meta.matched_rules,
        vec!["suffix:_rt".to_string(), "keyword:error".to_string()]
    );
}

#[test]
fn confidence_is_capped_below_the_instrument_tier() {
    let rules = sample_rules();
    let meta = infer("reaction time latency time count error (ms)", &rules);

    assert!((meta.confidence - 0.9).abs() < 1e-6);
    assert!(meta.confidence < 0.95);
}

#[test]
fn empty_repository_always_falls_back() {
    let rules = RuleRepository::default();
    let meta = infer("Task Completion Time (s)", &rules);

    assert_eq!(meta.category, MeasurementCategory::Continuous);
    assert_eq!(meta.confidence, 0.3);
    assert!(meta.matched_rules.is_empty());
}
