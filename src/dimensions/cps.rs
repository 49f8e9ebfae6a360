//! Cognitive Progression Scale (CPS).
//!
//! Places the exchange on a five-step collaboration ladder, from plain
//! information seeking up to generalizing knowledge into new domains.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::{Dimension, DimensionAnalyzer, DimensionScore, RawCounts, TierTable};
use crate::features::{FeatureSet, PhraseSet};
use crate::types::Interaction;

static TIERS: TierTable = TierTable::new(&[
    (0.8, "Advanced"),
    (0.6, "Solid"),
    (0.4, "Developing"),
    (0.0, "Basic"),
]);

/// One rung of the progression ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ProgressionLevel {
    pub level: u8,
    pub name: &'static str,
    pub description: &'static str,
}

pub const LEVELS: [ProgressionLevel; 5] = [
    ProgressionLevel {
        level: 1,
        name: "Awareness",
        description: "basic information exchange",
    },
    ProgressionLevel {
        level: 2,
        name: "Exploration",
        description: "comparing options and examples",
    },
    ProgressionLevel {
        level: 3,
        name: "Application",
        description: "actionable steps and methods",
    },
    ProgressionLevel {
        level: 4,
        name: "Co-Creation",
        description: "building solutions together",
    },
    ProgressionLevel {
        level: 5,
        name: "Expansion",
        description: "generalizing knowledge to new domains",
    },
];

/// Prompt markers per level, indexed like [`LEVELS`].
const USER_MARKERS: [&[&str]; 5] = [
    &[
        "what is",
        "define",
        "explain",
        "tell me about",
        "what does",
        "how does",
        "why is",
        "when should",
    ],
    &[
        "options",
        "examples",
        "compare",
        "different ways",
        "alternatives",
        "possibilities",
        "what are some",
        "show me",
        "give me examples",
    ],
    &[
        "how to",
        "apply",
        "steps",
        "implement",
        "process",
        "method",
        "procedure",
        "guide",
        "tutorial",
        "walk me through",
        "show me how",
    ],
    &[
        "let's",
        "we can",
        "we should",
        "build together",
        "collaborate",
        "partner",
        "your input",
        "what do you think",
        "our",
        "together",
        "jointly",
        "work with me",
    ],
    &[
        "could also",
        "apply to",
        "broader use",
        "generalize",
        "other applications",
        "beyond this",
        "what if",
        "how else",
        "future implications",
        "long-term",
    ],
];

/// Response markers per level, indexed like [`LEVELS`].
const AI_MARKERS: [&[&str]; 5] = [
    &[
        "definition",
        "explanation",
        "introduction",
        "overview",
        "basic concept",
        "fundamental",
        "simple terms",
    ],
    &[
        "options include",
        "examples are",
        "compare and contrast",
        "different approaches",
        "several ways",
        "alternatives",
        "for instance",
        "such as",
    ],
    &[
        "step by step",
        "first then",
        "process involves",
        "implementation guide",
        "actionable steps",
        "methodology",
        "to apply this",
        "practical approach",
    ],
    &[
        "let's",
        "we can",
        "we should",
        "together we",
        "collaboratively",
        "partnership",
        "your thoughts",
        "what are your ideas",
        "how shall we",
        "shall we",
    ],
    &[
        "broader implications",
        "can be applied to",
        "generalizes to",
        "other contexts",
        "future applications",
        "extending this",
        "similar principles",
        "across domains",
    ],
];

static USER_TABLE: Lazy<Vec<PhraseSet>> =
    Lazy::new(|| USER_MARKERS.iter().map(|m| PhraseSet::new(m)).collect());
static AI_TABLE: Lazy<Vec<PhraseSet>> =
    Lazy::new(|| AI_MARKERS.iter().map(|m| PhraseSet::new(m)).collect());

/// Highest level (1-based) with at least one marker in `text`, and the
/// markers matched there. `None` when no level matches.
fn highest_level(table: &[PhraseSet], text: &str) -> Option<(u8, Vec<&'static str>)> {
    table
        .iter()
        .enumerate()
        .rev()
        .map(|(i, set)| (i as u8 + 1, set.matched(text)))
        .find(|(_, markers)| !markers.is_empty())
}

fn level_of(reached: &Option<(u8, Vec<&'static str>)>) -> u8 {
    reached.as_ref().map_or(1, |(level, _)| *level)
}

/// Analyzer for the CPS dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpsAnalyzer;

impl DimensionAnalyzer for CpsAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Cps
    }

    fn analyze(&self, _interaction: &Interaction, features: &FeatureSet) -> DimensionScore {
        if features.is_degenerate() {
            return DimensionScore::degenerate(
                Dimension::Cps,
                &TIERS,
                "Insufficient data - both prompt and response are needed",
            );
        }

        let user = highest_level(&USER_TABLE, &features.prompt.lower);
        let ai = highest_level(&AI_TABLE, &features.response.lower);
        // The response's level, raised to the prompt's; 1 when neither matches.
        let level = level_of(&user).max(level_of(&ai));
        let info = LEVELS[usize::from(level - 1)];

        let raw_counts = RawCounts::from([
            ("achieved_level", usize::from(level)),
            ("user_level", user.as_ref().map_or(0, |(l, _)| usize::from(*l))),
            ("ai_level", ai.as_ref().map_or(0, |(l, _)| usize::from(*l))),
            ("user_markers", user.as_ref().map_or(0, |(_, m)| m.len())),
            ("ai_markers", ai.as_ref().map_or(0, |(_, m)| m.len())),
        ]);
        let detail = format!("Level {}: {} - {}", info.level, info.name, info.description);

        let mut evidence = Vec::new();
        for (side, reached) in [("user", &user), ("ai", &ai)] {
            if let Some((l, markers)) = reached {
                evidence.extend(markers.iter().map(|m| format!("{} level {}: {}", side, l, m)));
            }
        }

        DimensionScore::new(
            Dimension::Cps,
            f64::from(level) / 5.0,
            &TIERS,
            detail,
            raw_counts,
        )
        .with_evidence(evidence)
    }
}
