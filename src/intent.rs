//! User intent classification.
//!
//! The prompt is matched against one weighted phrase table per
//! [`Archetype`]. The archetype with the largest matched weight wins, ties
//! go to the earlier archetype in [`Archetype::ALL`], and a prompt that
//! matches nothing falls back to [`Archetype::InformationSeeker`] with zero
//! confidence.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::features::{phrase_regex, FeatureSet};
use crate::types::Interaction;

/// What the user is trying to get out of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    PrecisionSeeker,
    StrategicExplorer,
    CoCreationPartner,
    DebuggingPartner,
    InformationSeeker,
}

impl Archetype {
    /// All archetypes in tie-break priority order.
    pub const ALL: [Archetype; 5] = [
        Self::PrecisionSeeker,
        Self::StrategicExplorer,
        Self::CoCreationPartner,
        Self::DebuggingPartner,
        Self::InformationSeeker,
    ];

    /// Returned when no archetype matches.
    pub const FALLBACK: Archetype = Self::InformationSeeker;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrecisionSeeker => "precision_seeker",
            Self::StrategicExplorer => "strategic_explorer",
            Self::CoCreationPartner => "co_creation_partner",
            Self::DebuggingPartner => "debugging_partner",
            Self::InformationSeeker => "information_seeker",
        }
    }

    /// Human-readable name for interpretation text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PrecisionSeeker => "precision seeker",
            Self::StrategicExplorer => "strategic explorer",
            Self::CoCreationPartner => "co-creation partner",
            Self::DebuggingPartner => "debugging partner",
            Self::InformationSeeker => "information seeker",
        }
    }

    fn keywords(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::PrecisionSeeker => PRECISION_KEYWORDS,
            Self::StrategicExplorer => STRATEGIC_KEYWORDS,
            Self::CoCreationPartner => CO_CREATION_KEYWORDS,
            Self::DebuggingPartner => DEBUGGING_KEYWORDS,
            Self::InformationSeeker => INFORMATION_KEYWORDS,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

const PRECISION_KEYWORDS: &[(&str, f64)] = &[
    ("exact", 1.0),
    ("exactly", 1.0),
    ("define", 1.0),
    ("list", 1.0),
    ("specifically", 1.0),
    ("no fluff", 2.0),
    ("correct", 1.0),
    ("only", 1.0),
    ("step-by-step", 1.0),
    ("precise", 1.0),
];

const STRATEGIC_KEYWORDS: &[(&str, f64)] = &[
    ("framework", 1.0),
    ("model", 1.0),
    ("system", 1.0),
    ("big picture", 2.0),
    ("how does this fit", 2.0),
    ("map", 1.0),
    ("concept", 1.0),
    ("strategy", 1.0),
];

const CO_CREATION_KEYWORDS: &[(&str, f64)] = &[
    ("let's", 1.0),
    ("build", 1.0),
    ("together", 1.0),
    ("collaborate", 1.0),
    ("your input", 1.0),
    ("what do you think", 1.0),
];

const DEBUGGING_KEYWORDS: &[(&str, f64)] = &[
    ("error", 1.0),
    ("bug", 1.0),
    ("debug", 1.0),
    ("fix", 1.0),
    ("stack trace", 2.0),
    ("crash", 1.0),
    ("crashes", 1.0),
    ("failing", 1.0),
    ("doesn't work", 2.0),
    ("broken", 1.0),
];

const INFORMATION_KEYWORDS: &[(&str, f64)] = &[
    ("what is", 1.0),
    ("what are", 1.0),
    ("explain", 1.0),
    ("tell me about", 1.0),
    ("how does", 1.0),
    ("why", 1.0),
    ("who", 1.0),
    ("when", 1.0),
];

struct KeywordTable {
    archetype: Archetype,
    entries: Vec<(&'static str, f64, Regex)>,
    total_weight: f64,
}

static TABLES: Lazy<Vec<KeywordTable>> = Lazy::new(|| {
    Archetype::ALL
        .iter()
        .map(|&archetype| {
            let keywords = archetype.keywords();
            KeywordTable {
                archetype,
                entries: keywords
                    .iter()
                    .map(|&(phrase, weight)| (phrase, weight, phrase_regex(phrase)))
                    .collect(),
                total_weight: keywords.iter().map(|(_, w)| w).sum(),
            }
        })
        .collect()
});

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Detected archetype with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentResult {
    pub archetype: Archetype,
    /// Matched weight over the archetype's total weight, in [0, 1].
    pub confidence: f64,
    /// Phrases of the winning table found in the prompt, in table order.
    pub matched_terms: Vec<&'static str>,
}

impl IntentResult {
    pub fn fallback() -> Self {
        Self {
            archetype: Archetype::FALLBACK,
            confidence: 0.0,
            matched_terms: Vec::new(),
        }
    }
}

/// Classify the prompt of `interaction` into an [`Archetype`].
pub fn classify(_interaction: &Interaction, features: &FeatureSet) -> IntentResult {
    let prompt = features.prompt.lower.as_str();
    let mut best: Option<(&KeywordTable, f64, Vec<&'static str>)> = None;

    for table in TABLES.iter() {
        let matched: Vec<&'static str> = table
            .entries
            .iter()
            .filter(|(_, _, re)| re.is_match(prompt))
            .map(|(phrase, _, _)| *phrase)
            .collect();
        let weight: f64 = table
            .entries
            .iter()
            .filter(|(phrase, _, _)| matched.contains(phrase))
            .map(|(_, w, _)| w)
            .sum();
        // Strict comparison keeps the earlier archetype on ties.
        let better = match &best {
            Some((_, best_weight, _)) => weight > *best_weight,
            None => weight > 0.0,
        };
        if better {
            best = Some((table, weight, matched));
        }
    }

    match best {
        Some((table, weight, matched_terms)) => IntentResult {
            archetype: table.archetype,
            confidence: (weight / table.total_weight).clamp(0.0, 1.0),
            matched_terms,
        },
        None => IntentResult::fallback(),
    }
}
