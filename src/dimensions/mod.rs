//! The six scoring dimensions.
//!
//! Each dimension is a stateless [`DimensionAnalyzer`] that turns an
//! [`Interaction`] and its precomputed [`FeatureSet`] into a
//! [`DimensionScore`]. Analyzers never fail: text they cannot work with
//! yields value 0.0 and the lowest label of the dimension's [`TierTable`].
//!
//! | Dimension | Reads            | Measures                                   |
//! |-----------|------------------|--------------------------------------------|
//! | IAI       | prompt           | clarity, specificity, context of the input |
//! | CAI       | response         | conceptual anchors (boundary/analogy/hypothesis) |
//! | PAS       | response, prompt | chunking, structure, collaboration, rhythm |
//! | SAS       | both             | stylistic and intentional synchronization  |
//! | CPS       | both             | collaboration level reached (1-5)          |
//! | CSS       | both             | cognitive safety level (1-5)               |

pub mod cai;
pub mod cps;
pub mod css;
pub mod iai;
pub mod pas;
pub mod sas;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::features::FeatureSet;
use crate::types::Interaction;

pub use cai::CaiAnalyzer;
pub use cps::CpsAnalyzer;
pub use css::CssAnalyzer;
pub use iai::IaiAnalyzer;
pub use pas::PasAnalyzer;
pub use sas::SasAnalyzer;

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// The six scoring axes, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Iai,
    Cai,
    Pas,
    Sas,
    Cps,
    Css,
}

impl Dimension {
    /// All dimensions in reporting order.
    pub const ALL: [Dimension; 6] = [
        Self::Iai,
        Self::Cai,
        Self::Pas,
        Self::Sas,
        Self::Cps,
        Self::Css,
    ];

    /// Upper-case abbreviation used in interpretation strings.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Iai => "IAI",
            Self::Cai => "CAI",
            Self::Pas => "PAS",
            Self::Sas => "SAS",
            Self::Cps => "CPS",
            Self::Css => "CSS",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// A qualitative tier. `rank` 0 is the lowest tier of its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Label {
    pub rank: u8,
    pub name: &'static str,
}

impl Label {
    pub fn is_lowest(&self) -> bool {
        self.rank == 0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered `(threshold, label)` pairs, highest threshold first.
///
/// A value takes the first label whose threshold it meets (`value >=
/// threshold`), so a value sitting exactly on a boundary gets the higher
/// label. Values are snapped to nine decimal places first, so a weighted sum
/// that lands a rounding error below a boundary still counts as on it. The
/// last entry is the floor and is returned for anything below it.
#[derive(Debug)]
pub struct TierTable {
    tiers: &'static [(f64, &'static str)],
}

impl TierTable {
    pub const fn new(tiers: &'static [(f64, &'static str)]) -> Self {
        Self { tiers }
    }

    pub fn label_for(&self, value: f64) -> Label {
        let value = snap(value);
        let top = self.tiers.len().saturating_sub(1);
        for (i, &(threshold, name)) in self.tiers.iter().enumerate() {
            if value >= threshold {
                return Label {
                    rank: (top - i) as u8,
                    name,
                };
            }
        }
        self.lowest()
    }

    pub fn lowest(&self) -> Label {
        Label {
            rank: 0,
            name: self.tiers.last().map(|(_, name)| *name).unwrap_or("None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Sub-feature name → count.
pub type RawCounts = BTreeMap<&'static str, usize>;

/// Sub-score name → value in [0, 1].
pub type Components = BTreeMap<&'static str, f64>;

/// Result of one analyzer for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Score in [0, 1].
    pub value: f64,
    pub label: Label,
    pub detail: String,
    pub raw_counts: RawCounts,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: Components,
    /// Matched text behind the score, such as anchors or level markers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

impl DimensionScore {
    /// Build a score, clamping and snapping `value` into [0, 1] and
    /// labelling it.
    pub fn new(
        dimension: Dimension,
        value: f64,
        tiers: &TierTable,
        detail: impl Into<String>,
        raw_counts: RawCounts,
    ) -> Self {
        let value = snap(clamp_unit(value));
        Self {
            dimension,
            value,
            label: tiers.label_for(value),
            detail: detail.into(),
            raw_counts,
            components: Components::new(),
            evidence: Vec::new(),
        }
    }

    /// Lowest-tier score for text the analyzer cannot work with.
    pub fn degenerate(dimension: Dimension, tiers: &TierTable, reason: &str) -> Self {
        Self {
            dimension,
            value: 0.0,
            label: tiers.lowest(),
            detail: reason.to_string(),
            raw_counts: RawCounts::new(),
            components: Components::new(),
            evidence: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    /// `"<ABBR>: <label> - <detail>"`.
    pub fn interpretation(&self) -> String {
        format!(
            "{}: {} - {}",
            self.dimension.abbreviation(),
            self.label,
            self.detail
        )
    }
}

/// Decimal places kept before a value is compared against tier thresholds.
const SNAP_PRECISION: i32 = 9;

/// Round away floating-point noise from weighted sums.
fn snap(value: f64) -> f64 {
    let scale = 10f64.powi(SNAP_PRECISION);
    (value * scale).round() / scale
}

/// Clamp into [0, 1], mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Analyzer trait
// ---------------------------------------------------------------------------

/// A single scoring dimension.
///
/// Implementations hold only immutable configuration, so one instance can
/// serve any number of concurrent calls.
pub trait DimensionAnalyzer: Send + Sync {
    /// The dimension this analyzer scores.
    fn dimension(&self) -> Dimension;

    /// Score one interaction.
    fn analyze(&self, interaction: &Interaction, features: &FeatureSet) -> DimensionScore;
}

/// The default analyzer for every dimension, in reporting order.
pub fn default_analyzers() -> [Box<dyn DimensionAnalyzer>; 6] {
    [
        Box::new(IaiAnalyzer),
        Box::new(CaiAnalyzer),
        Box::new(PasAnalyzer),
        Box::new(SasAnalyzer),
        Box::new(CpsAnalyzer),
        Box::new(CssAnalyzer),
    ]
}

// ---------------------------------------------------------------------------
// Score collection
// ---------------------------------------------------------------------------

/// One score per dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScores {
    pub iai: DimensionScore,
    pub cai: DimensionScore,
    pub pas: DimensionScore,
    pub sas: DimensionScore,
    pub cps: DimensionScore,
    pub css: DimensionScore,
}

impl DimensionScores {
    /// Assemble from scores already in [`Dimension::ALL`] order.
    pub fn from_array(scores: [DimensionScore; 6]) -> Self {
        debug_assert!(scores
            .iter()
            .zip(Dimension::ALL)
            .all(|(score, dimension)| score.dimension == dimension));
        let [iai, cai, pas, sas, cps, css] = scores;
        Self {
            iai,
            cai,
            pas,
            sas,
            cps,
            css,
        }
    }

    pub fn get(&self, dimension: Dimension) -> &DimensionScore {
        match dimension {
            Dimension::Iai => &self.iai,
            Dimension::Cai => &self.cai,
            Dimension::Pas => &self.pas,
            Dimension::Sas => &self.sas,
            Dimension::Cps => &self.cps,
            Dimension::Css => &self.css,
        }
    }

    /// Scores in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &DimensionScore> {
        Dimension::ALL.into_iter().map(move |d| self.get(d))
    }

    /// Values in reporting order.
    pub fn values(&self) -> [f64; 6] {
        Dimension::ALL.map(|d| self.get(d).value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: TierTable =
        TierTable::new(&[(0.8, "Excellent"), (0.6, "Good"), (0.4, "Moderate"), (0.0, "Poor")]);

    #[test]
    fn test_tier_boundaries_resolve_upward() {
        assert_eq!(TABLE.label_for(0.8).name, "Excellent");
        assert_eq!(TABLE.label_for(0.6).name, "Good");
        assert_eq!(TABLE.label_for(0.59).name, "Moderate");
        assert_eq!(TABLE.label_for(0.0).name, "Poor");
    }

    #[test]
    fn test_tier_ranks() {
        assert_eq!(TABLE.label_for(1.0).rank, 3);
        assert!(TABLE.label_for(0.1).is_lowest());
        assert_eq!(TABLE.lowest().name, "Poor");
    }

    #[test]
    fn test_score_is_clamped() {
        let score = DimensionScore::new(Dimension::Iai, 1.7, &TABLE, "x", RawCounts::new());
        assert_eq!(score.value, 1.0);
        let score = DimensionScore::new(Dimension::Iai, f64::NAN, &TABLE, "x", RawCounts::new());
        assert_eq!(score.value, 0.0);
        assert!(score.label.is_lowest());
    }

    #[test]
    fn test_interpretation_format() {
        let score = DimensionScore::new(Dimension::Cai, 0.5, &TABLE, "2 anchors", RawCounts::new());
        assert_eq!(score.interpretation(), "CAI: Moderate - 2 anchors");
    }

    #[test]
    fn test_default_analyzers_cover_all_dimensions_in_order() {
        let dims: Vec<Dimension> = default_analyzers().iter().map(|a| a.dimension()).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
    }

    #[test]
    fn test_boundary_value_below_threshold_by_rounding_gets_higher_label() {
        assert_eq!(TABLE.label_for(0.39999999999999997).name, "Moderate");
        assert_eq!(TABLE.label_for(0.7999999999999999).name, "Excellent");
        assert_eq!(TABLE.label_for(0.3999).name, "Poor");

        let score = DimensionScore::new(
            Dimension::Iai,
            0.39999999999999997,
            &TABLE,
            "x",
            RawCounts::new(),
        );
        assert_eq!(score.value, 0.4);
        assert_eq!(score.label.name, "Moderate");
    }

    #[test]
    fn test_from_array_keeps_reporting_order() {
        let scores = DimensionScores::from_array(
            Dimension::ALL.map(|d| DimensionScore::degenerate(d, &TABLE, "empty")),
        );
        let dims: Vec<Dimension> = scores.iter().map(|s| s.dimension).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
        assert_eq!(scores.values(), [0.0; 6]);
    }
}
