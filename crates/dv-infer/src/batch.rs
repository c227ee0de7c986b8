//! Batch classification over column labels.

use dv_model::MeasurementMeta;
use dv_standards::RuleRepository;

use crate::engine::infer;

/// One classified label with a review flag recomputed against the
/// caller's threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub label: String,
    pub meta: MeasurementMeta,
    /// `confidence < threshold` for the caller's threshold. The meta's
    /// own `needs_review` field keeps the engine's fixed cutoff.
    pub needs_review: bool,
}

/// Classify every label, flagging items below `threshold` for review.
///
/// Output order matches input order. The metadata is returned as the
/// engine produced it; only the item-level flag reflects the threshold.
pub fn batch_infer(labels: &[String], threshold: f32, rules: &RuleRepository) -> Vec<BatchItem> {
    labels
        .iter()
        .map(|label| {
            let meta = infer(label, rules);
            let needs_review = meta.confidence < threshold;
            BatchItem {
                label: label.clone(),
                meta,
                needs_review,
            }
        })
        .collect()
}
