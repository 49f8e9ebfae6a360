//! Resonance index aggregation and interpretation.
//!
//! ```text
//! RI = (0.25·IAI + 0.20·CAI + 0.20·PAS + 0.15·SAS + 0.10·CPS + 0.10·CSS) × modulator
//! ```

use crate::alignment::AlignmentResult;
use crate::dimensions::{clamp_unit, Dimension, DimensionScores};
use crate::intent::IntentResult;

/// Dimension weights in [`Dimension::ALL`] order; they sum to 1.0.
pub const WEIGHTS: [(Dimension, f64); 6] = [
    (Dimension::Iai, 0.25),
    (Dimension::Cai, 0.20),
    (Dimension::Pas, 0.20),
    (Dimension::Sas, 0.15),
    (Dimension::Cps, 0.10),
    (Dimension::Css, 0.10),
];

/// Weighted sum of the six dimension values, before modulation.
pub fn weighted_sum(values: &[f64; 6]) -> f64 {
    WEIGHTS
        .iter()
        .zip(values.iter())
        .map(|((_, weight), value)| weight * value)
        .sum()
}

/// Combine the dimension scores and the alignment modulator.
pub fn resonance_index(scores: &DimensionScores, modulator: f64) -> f64 {
    clamp_unit(weighted_sum(&scores.values()) * clamp_unit(modulator))
}

/// One line per dimension in reporting order, then the alignment summary.
pub fn interpret(
    scores: &DimensionScores,
    intent: &IntentResult,
    alignment: &AlignmentResult,
) -> Vec<String> {
    scores
        .iter()
        .map(|score| score.interpretation())
        .chain(std::iter::once(alignment.summary(intent.archetype)))
        .collect()
}
