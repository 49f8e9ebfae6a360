//! Conceptual Anchoring Index (CAI).
//!
//! Counts the conceptual anchors in the response (see
//! [`crate::features::anchors`]) and maps the total through a saturating
//! curve: each of the first three anchors is worth 0.25, after which every
//! further anchor closes half of the remaining gap to 1.0.

use super::{Dimension, DimensionAnalyzer, DimensionScore, RawCounts, TierTable};
use crate::features::FeatureSet;
use crate::types::Interaction;

static TIERS: TierTable = TierTable::new(&[
    (0.85, "Excellent"),
    (0.75, "Good"),
    (0.5, "Basic"),
    (0.25, "Minimal"),
    (0.0, "Absent"),
]);

/// Anchor count after which returns diminish.
pub const LINEAR_ANCHORS: usize = 3;

/// Score per anchor up to [`LINEAR_ANCHORS`].
pub const ANCHOR_STEP: f64 = 0.25;

/// Map an anchor count to a CAI value. Non-decreasing in `count`.
pub fn anchor_curve(count: usize) -> f64 {
    if count <= LINEAR_ANCHORS {
        return count as f64 * ANCHOR_STEP;
    }
    let base = LINEAR_ANCHORS as f64 * ANCHOR_STEP;
    let extra = (count - LINEAR_ANCHORS).min(64) as i32;
    base + (1.0 - base) * (1.0 - 0.5_f64.powi(extra))
}

/// Analyzer for the CAI dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaiAnalyzer;

impl DimensionAnalyzer for CaiAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Cai
    }

    fn analyze(&self, _interaction: &Interaction, features: &FeatureSet) -> DimensionScore {
        if features.response.is_empty() {
            return DimensionScore::degenerate(
                Dimension::Cai,
                &TIERS,
                "No AI response provided - no anchors to detect",
            );
        }

        let anchors = features.anchor_counts;
        let total = anchors.total();
        let raw_counts = RawCounts::from([
            ("boundary", anchors.boundary),
            ("analogy", anchors.analogy),
            ("hypothesis", anchors.hypothesis),
            ("total", total),
        ]);

        let detail = if total == 0 {
            "No conceptual anchors detected - response lacks structure".to_string()
        } else {
            format!(
                "{} anchor(s): boundary={}, analogy={}, hypothesis={}",
                total, anchors.boundary, anchors.analogy, anchors.hypothesis
            )
        };

        let evidence = features
            .anchors
            .iter()
            .map(|anchor| format!("{}: {}", anchor.kind.as_str(), anchor.text))
            .collect();

        DimensionScore::new(Dimension::Cai, anchor_curve(total), &TIERS, detail, raw_counts)
            .with_evidence(evidence)
    }
}
