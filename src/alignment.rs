//! Alignment modulator.
//!
//! Compares what the detected archetype expects against what the exchange
//! delivered, on two axes: the six-dimension profile (mean absolute
//! deviation from a reference vector) and the response style (concise,
//! structured, interactive, framework). The result is a penalty in [0, 1]
//! and the modulator `1 - penalty` that scales the resonance index.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::dimensions::{clamp_unit, DimensionScores};
use crate::features::{FeatureSet, PatternSet};
use crate::intent::{Archetype, IntentResult};

/// Reference dimension profile per archetype, `[iai, cai, pas, sas, cps, css]`.
pub fn reference_profile(archetype: Archetype) -> [f64; 6] {
    match archetype {
        Archetype::PrecisionSeeker => [0.7, 0.5, 0.5, 0.7, 0.4, 0.6],
        Archetype::StrategicExplorer => [0.6, 0.75, 0.5, 0.6, 0.6, 0.6],
        Archetype::CoCreationPartner => [0.5, 0.5, 0.6, 0.7, 0.8, 0.8],
        Archetype::DebuggingPartner => [0.6, 0.5, 0.6, 0.6, 0.6, 0.6],
        Archetype::InformationSeeker => [0.5, 0.5, 0.4, 0.6, 0.4, 0.6],
    }
}

const PROFILE_WEIGHT: f64 = 0.7;
const STYLE_WEIGHT: f64 = 0.3;

/// Precision seekers are penalized for responses longer than this.
const VERBOSE_WORDS: usize = 300;
/// Responses up to this many words count as concise.
const CONCISE_WORDS: usize = 150;

// ---------------------------------------------------------------------------
// Response styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    Concise,
    Structured,
    Interactive,
    Framework,
}

impl ResponseStyle {
    /// Styles the archetype responds well to.
    pub fn preferred_by(archetype: Archetype) -> &'static [ResponseStyle] {
        match archetype {
            Archetype::PrecisionSeeker => &[Self::Concise, Self::Structured],
            Archetype::StrategicExplorer => &[Self::Framework, Self::Structured],
            Archetype::CoCreationPartner => &[Self::Interactive],
            Archetype::DebuggingPartner => &[Self::Structured, Self::Interactive],
            Archetype::InformationSeeker => &[Self::Concise, Self::Structured],
        }
    }
}

const STRUCTURED_PATTERNS: &[&str] = &[
    r"(?m)^\s*\d+\.",
    r"(?m)^\s*- ",
    r"\bfirst\b",
    r"\bnext\b",
    r"\bfinally\b",
];
const INTERACTIVE_PATTERNS: &[&str] = &[r"\?", r"\byour input\b", r"\bcollaborate\b"];
const FRAMEWORK_PATTERNS: &[&str] = &[
    r"\blike a\b",
    r"\bsimilar to\b",
    r"\bframework\b",
    r"\bmodel\b",
];

const STYLE_CUE: f64 = 0.3;

static STRUCTURED: Lazy<PatternSet> = Lazy::new(|| PatternSet::new(STRUCTURED_PATTERNS));
static INTERACTIVE: Lazy<PatternSet> = Lazy::new(|| PatternSet::new(INTERACTIVE_PATTERNS));
static FRAMEWORK: Lazy<PatternSet> = Lazy::new(|| PatternSet::new(FRAMEWORK_PATTERNS));

/// Score of each [`ResponseStyle`] for the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StyleScores {
    pub concise: f64,
    pub structured: f64,
    pub interactive: f64,
    pub framework: f64,
}

impl StyleScores {
    pub fn measure(features: &FeatureSet) -> Self {
        let response = &features.response;
        if response.is_empty() {
            return Self::default();
        }
        let text = response.lower.as_str();
        let cues = |set: &PatternSet| (set.distinct_matches(text) as f64 * STYLE_CUE).min(1.0);
        Self {
            concise: if response.word_count() <= CONCISE_WORDS { 0.5 } else { 0.0 },
            structured: cues(&STRUCTURED),
            interactive: cues(&INTERACTIVE),
            framework: cues(&FRAMEWORK),
        }
    }

    pub fn get(&self, style: ResponseStyle) -> f64 {
        match style {
            ResponseStyle::Concise => self.concise,
            ResponseStyle::Structured => self.structured,
            ResponseStyle::Interactive => self.interactive,
            ResponseStyle::Framework => self.framework,
        }
    }
}

// ---------------------------------------------------------------------------
// Modulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult {
    /// 0 = perfect match, 1 = total mismatch.
    pub penalty: f64,
    /// `1 - penalty`; multiplies the weighted dimension sum.
    pub modulator: f64,
    /// Mean absolute deviation from the archetype's reference profile.
    pub profile_distance: f64,
    /// Mean score of the archetype's preferred response styles.
    pub style_match: f64,
    pub response_styles: StyleScores,
}

impl AlignmentResult {
    /// One-line summary naming the archetype and the modulator's effect.
    pub fn summary(&self, archetype: Archetype) -> String {
        let fit = if self.penalty <= 0.2 {
            "Strong"
        } else if self.penalty <= 0.4 {
            "Moderate"
        } else {
            "Weak"
        };
        format!(
            "AM: {} alignment with a {} - index scaled by {:.3} (penalty {:.3})",
            fit,
            archetype.display_name(),
            self.modulator,
            self.penalty
        )
    }
}

/// Mean absolute deviation between two profiles.
pub fn profile_distance(actual: &[f64; 6], reference: &[f64; 6]) -> f64 {
    let total: f64 = actual
        .iter()
        .zip(reference.iter())
        .map(|(a, r)| (a - r).abs())
        .sum();
    total / actual.len() as f64
}

/// Compute the alignment penalty and modulator for one analysis.
pub fn modulate(
    intent: &IntentResult,
    scores: &DimensionScores,
    features: &FeatureSet,
) -> AlignmentResult {
    let archetype = intent.archetype;
    let distance = profile_distance(&scores.values(), &reference_profile(archetype));

    let styles = StyleScores::measure(features);
    let preferred = ResponseStyle::preferred_by(archetype);
    let style_match = if preferred.is_empty() {
        0.0
    } else {
        preferred.iter().map(|&s| styles.get(s)).sum::<f64>() / preferred.len() as f64
    };

    let mut penalty = PROFILE_WEIGHT * distance + STYLE_WEIGHT * (1.0 - style_match);
    match archetype {
        Archetype::PrecisionSeeker if features.response.word_count() > VERBOSE_WORDS => {
            penalty += 0.1;
        }
        Archetype::CoCreationPartner if styles.interactive > 0.5 => {
            penalty -= 0.1;
        }
        _ => {}
    }
    let penalty = clamp_unit(penalty);

    AlignmentResult {
        penalty,
        modulator: 1.0 - penalty,
        profile_distance: distance,
        style_match: clamp_unit(style_match),
        response_styles: styles,
    }
}
