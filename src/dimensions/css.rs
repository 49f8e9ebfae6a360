//! Cognitive Safety Scale (CSS).
//!
//! Combines three signals into a five-level safety scale:
//!
//! - **safety**: supportive, collaborative and empowering phrasing in the
//!   response, minus dismissive phrasing;
//! - **comfort**: how settled the user sounds in the prompt;
//! - **context**: whether the response length is proportionate to the prompt.

use once_cell::sync::Lazy;

use super::{
    clamp_unit, Components, Dimension, DimensionAnalyzer, DimensionScore, RawCounts, TierTable,
};
use crate::features::{FeatureSet, PhraseSet};
use crate::types::Interaction;

static TIERS: TierTable = TierTable::new(&[
    (0.8, "High"),
    (0.6, "Good"),
    (0.4, "Moderate"),
    (0.0, "Low"),
]);

/// Level names, indexed by level - 1.
pub const LEVEL_NAMES: [&str; 5] = [
    "Cognitive Lockdown",
    "Safety Testing",
    "Consequence-Free Scrutiny",
    "Co-Creative Partnership",
    "Cognitive Expansion",
];

const LEVEL_SUMMARIES: [&str; 5] = [
    "user may feel overwhelmed or unable to proceed",
    "cautious engagement with basic trust established",
    "comfortable exploration without fear",
    "active collaboration with shared ownership",
    "empowered to apply learning broadly",
];

/// Combined-score thresholds for levels 5 down to 2; anything lower is 1.
const LEVEL_THRESHOLDS: [(f64, u8); 4] = [(0.8, 5), (0.7, 4), (0.6, 3), (0.4, 2)];

const POSITIVE_SIGNALS: &[&str] = &[
    "does this make sense",
    "please clarify",
    "let me know",
    "your thoughts",
    "what do you think",
    "feel free to ask",
    "i want to ensure",
    "correct me if i'm wrong",
    "am i understanding",
    "we can adjust",
    "your feedback",
    "how does that sound",
    "comfortable with",
    "happy to explain",
    "take your time",
    "i might be wrong",
    "it depends",
    "i'm not sure",
];
const NEGATIVE_SIGNALS: &[&str] = &[
    "obviously",
    "clearly",
    "everyone knows",
    "you should know",
    "basic knowledge",
    "simple concept",
    "easy to understand",
    "no excuse for not knowing",
    "if you can't understand this",
    "even a child could",
];
const COLLABORATIVE_SIGNALS: &[&str] = &[
    "let's",
    "we can",
    "we should",
    "our",
    "together",
    "collaborate",
    "partner",
    "jointly",
    "build with",
    "work together",
    "team effort",
];
const EMPOWERMENT_SIGNALS: &[&str] = &[
    "you can",
    "you have the ability",
    "your expertise",
    "build on your knowledge",
    "apply this to",
    "generalize",
    "expand this concept",
    "future applications",
];
const COMFORTABLE_SIGNALS: &[&str] = &[
    "confident",
    "comfortable",
    "clear",
    "understand",
    "excited",
    "interested",
    "curious",
    "ready",
];
const UNCOMFORTABLE_SIGNALS: &[&str] = &[
    "confused",
    "frustrated",
    "overwhelmed",
    "lost",
    "complicated",
    "difficult",
    "hard",
    "struggling",
];

static POSITIVE: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(POSITIVE_SIGNALS));
static NEGATIVE: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(NEGATIVE_SIGNALS));
static COLLABORATIVE: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(COLLABORATIVE_SIGNALS));
static EMPOWERMENT: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(EMPOWERMENT_SIGNALS));
static COMFORTABLE: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(COMFORTABLE_SIGNALS));
static UNCOMFORTABLE: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(UNCOMFORTABLE_SIGNALS));

/// Signal counts gathered from one interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Signals {
    positive: usize,
    negative: usize,
    collaborative: usize,
    empowerment: usize,
    comfortable: usize,
    uncomfortable: usize,
}

impl Signals {
    fn gather(features: &FeatureSet) -> Self {
        let response = features.response.lower.as_str();
        let prompt = features.prompt.lower.as_str();
        Self {
            positive: POSITIVE.distinct_matches(response),
            negative: NEGATIVE.distinct_matches(response),
            collaborative: COLLABORATIVE.distinct_matches(response),
            empowerment: EMPOWERMENT.distinct_matches(response),
            comfortable: COMFORTABLE.distinct_matches(prompt),
            uncomfortable: UNCOMFORTABLE.distinct_matches(prompt),
        }
    }

    fn safety(&self) -> f64 {
        clamp_unit(
            0.5 + self.positive as f64 * 0.1 + self.collaborative as f64 * 0.08
                + self.empowerment as f64 * 0.07
                - self.negative as f64 * 0.15,
        )
    }

    fn comfort(&self) -> f64 {
        clamp_unit(0.5 + self.comfortable as f64 * 0.1 - self.uncomfortable as f64 * 0.15)
    }
}

/// Proportionality of the response length to the prompt length.
fn context(length_ratio: Option<f64>) -> f64 {
    let mut score: f64 = 0.7;
    if let Some(ratio) = length_ratio {
        if ratio > 5.0 {
            score -= 0.2;
        } else if ratio < 0.5 {
            score += 0.1;
        }
    }
    clamp_unit(score)
}

/// Map the combined signal onto a 1-5 level.
pub fn safety_level(combined: f64) -> u8 {
    LEVEL_THRESHOLDS
        .iter()
        .find(|&&(threshold, _)| combined >= threshold)
        .map_or(1, |&(_, level)| level)
}

/// Analyzer for the CSS dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssAnalyzer;

impl DimensionAnalyzer for CssAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Css
    }

    fn analyze(&self, _interaction: &Interaction, features: &FeatureSet) -> DimensionScore {
        if features.is_degenerate() {
            return DimensionScore::degenerate(
                Dimension::Css,
                &TIERS,
                "Insufficient data - both prompt and response are needed",
            );
        }

        let signals = Signals::gather(features);
        let safety = signals.safety();
        let comfort = signals.comfort();
        let context = context(features.length_ratio());
        let combined = safety * 0.6 + comfort * 0.3 + context * 0.1;
        let level = safety_level(combined);
        let index = usize::from(level - 1);

        let raw_counts = RawCounts::from([
            ("level", usize::from(level)),
            ("positive_signals", signals.positive),
            ("negative_signals", signals.negative),
            ("collaborative_signals", signals.collaborative),
            ("empowerment_signals", signals.empowerment),
            ("comfortable_signals", signals.comfortable),
            ("uncomfortable_signals", signals.uncomfortable),
        ]);
        let components = Components::from([
            ("safety", safety),
            ("comfort", comfort),
            ("context", context),
            ("combined", clamp_unit(combined)),
        ]);
        let detail = format!(
            "Level {}: {} - {}",
            level, LEVEL_NAMES[index], LEVEL_SUMMARIES[index]
        );

        DimensionScore::new(
            Dimension::Css,
            f64::from(level) / 5.0,
            &TIERS,
            detail,
            raw_counts,
        )
        .with_components(components)
    }
}
