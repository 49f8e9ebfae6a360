//! Synchronization Alignment Score (SAS).
//!
//! Measures how closely the response mirrors the prompt: communication
//! style family, shared vocabulary, sentence-length similarity, and whether
//! stated goals, format expectations and depth were met.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{
    Components, Dimension, DimensionAnalyzer, DimensionScore, RawCounts, TierTable,
};
use crate::features::{phrase_regex, FeatureSet, PatternSet, PhraseSet, TextProfile};
use crate::types::Interaction;

static TIERS: TierTable = TierTable::new(&[
    (0.8, "Excellent"),
    (0.6, "Good"),
    (0.4, "Moderate"),
    (0.2, "Poor"),
    (0.0, "Very poor"),
]);

/// Component weights; they sum to 1.0.
pub const WEIGHTS: [(&str, f64); 6] = [
    ("style_sync", 0.30),
    ("lexical_overlap", 0.15),
    ("sentence_similarity", 0.15),
    ("goal_sync", 0.15),
    ("expectation_sync", 0.10),
    ("depth_sync", 0.15),
];

// ---------------------------------------------------------------------------
// Style families
// ---------------------------------------------------------------------------

/// Communication style families compared between prompt and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleFamily {
    Formal,
    Informal,
    Direct,
    Narrative,
    DataDriven,
}

const FORMAL_PATTERNS: &[&str] = &[
    r"\b(?:therefore|however|furthermore|consequently|accordingly)\b",
    r"\b(?:additionally|specifically|notably|ultimately|importantly)\b",
    r"\bin conclusion\b",
    r"\bin summary\b",
    r"\bit is evident\b",
];
const INFORMAL_PATTERNS: &[&str] = &[
    r"\b(?:hey|hi|hello|thanks|cheers|awesome|great|perfect)\b",
    r"\b(?:let's|we'll|we're|i'm|you're)",
    r"(?m)!\s*$",
    r":\)|:d|;\)",
];
const DIRECT_PATTERNS: &[&str] = &[
    r"(?m)^[a-z][^.!?\n]*:",
    r"\b(?:yes|no|exactly|precisely|correct|incorrect)\b",
    r"(?m)^\s*\d+\.\s+",
    r"(?m)^\s*-\s+",
    r"\bkey points?\b",
    r"\bmain idea\b",
    r"\bbottom line\b",
];
const NARRATIVE_PATTERNS: &[&str] = &[
    r"\b(?:story|example|scenario|imagine)\b",
    r"\bfor instance\b",
    r"\bto illustrate\b",
    r"\bin other words\b",
];
const DATA_PATTERNS: &[&str] = &[
    r"\d+%",
    r"\d+\.\d+",
    r"\bstatistics?\b",
    r"\b(?:data|research|study|analysis|metrics)\b",
    r"\b(?:chart|graph|table|figure)\b",
];

/// Sentences at least this long count toward the narrative family.
const LONG_SENTENCE_WORDS: usize = 12;
/// Score added per style cue.
const STYLE_CUE: f64 = 0.1;
/// A dominant style must exceed this to earn the matching bonus.
const DOMINANT_STYLE_FLOOR: f64 = 0.3;

static STYLE_TABLE: Lazy<Vec<(StyleFamily, PatternSet)>> = Lazy::new(|| {
    vec![
        (StyleFamily::Formal, PatternSet::new(FORMAL_PATTERNS)),
        (StyleFamily::Informal, PatternSet::new(INFORMAL_PATTERNS)),
        (StyleFamily::Direct, PatternSet::new(DIRECT_PATTERNS)),
        (StyleFamily::Narrative, PatternSet::new(NARRATIVE_PATTERNS)),
        (StyleFamily::DataDriven, PatternSet::new(DATA_PATTERNS)),
    ]
});

/// Per-family style scores: formal, informal, direct, narrative, data-driven.
pub type StyleProfile = [f64; 5];

/// Score each style family for one text.
pub fn style_profile(text: &TextProfile) -> StyleProfile {
    let mut profile = [0.0; 5];
    for (slot, (family, patterns)) in profile.iter_mut().zip(STYLE_TABLE.iter()) {
        let mut cues = patterns.total_matches(&text.lower);
        if *family == StyleFamily::Narrative {
            cues += text
                .sentence_lengths
                .iter()
                .filter(|&&n| n >= LONG_SENTENCE_WORDS)
                .count();
        }
        *slot = (cues as f64 * STYLE_CUE).min(1.0);
    }
    profile
}

fn dominant(profile: &StyleProfile) -> (usize, f64) {
    profile
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::MIN), |best, (i, v)| if v > best.1 { (i, v) } else { best })
}

fn style_sync(user: &StyleProfile, ai: &StyleProfile) -> f64 {
    let mut score: f64 = 0.0;
    let (user_family, user_strength) = dominant(user);
    let (ai_family, _) = dominant(ai);
    if user_family == ai_family && user_strength > DOMINANT_STYLE_FLOOR {
        score += 0.4;
    }
    let similarity: f64 = user
        .iter()
        .zip(ai.iter())
        .map(|(u, a)| (1.0 - (u - a).abs()) * 0.2)
        .sum();
    score += similarity.min(0.6);
    score.min(1.0)
}

// ---------------------------------------------------------------------------
// Goal, expectation and depth
// ---------------------------------------------------------------------------

const GOAL_KEYWORDS: &[&str] = &[
    "goal",
    "objective",
    "target",
    "aim",
    "purpose",
    "want",
    "need",
    "looking for",
    "trying to",
    "achieve",
    "accomplish",
    "solve",
    "fix",
];
const GOAL_ACKNOWLEDGEMENTS: &[&str] = &[
    "your goal",
    "your objective",
    "what you want",
    "to achieve",
    "to accomplish",
    "as you requested",
];

static GOALS: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(GOAL_KEYWORDS));
static ACKNOWLEDGEMENTS: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(GOAL_ACKNOWLEDGEMENTS));

fn goal_sync(prompt: &TextProfile, response: &TextProfile) -> f64 {
    if !GOALS.contains_any(&prompt.lower) {
        return 0.7;
    }
    if ACKNOWLEDGEMENTS.contains_any(&response.lower) {
        0.9
    } else {
        0.6
    }
}

/// What a format request in the prompt expects of the response.
#[derive(Debug, Clone, Copy)]
enum Expectation {
    List,
    Brief,
    Long,
    Echo,
}

const EXPECTATIONS: &[(&str, Expectation)] = &[
    ("list", Expectation::List),
    ("bullet", Expectation::List),
    ("summary", Expectation::Brief),
    ("brief", Expectation::Brief),
    ("detailed", Expectation::Long),
    ("complex", Expectation::Long),
    ("simple", Expectation::Echo),
    ("step by step", Expectation::Echo),
    ("example", Expectation::Echo),
    ("explain", Expectation::Echo),
    ("define", Expectation::Echo),
    ("compare", Expectation::Echo),
    ("analyze", Expectation::Echo),
];

const BRIEF_MAX_WORDS: usize = 150;
const LONG_MIN_WORDS: usize = 200;

static EXPECTATION_TABLE: Lazy<Vec<(Regex, Expectation)>> = Lazy::new(|| {
    EXPECTATIONS
        .iter()
        .map(|&(word, kind)| (phrase_regex(word), kind))
        .collect()
});

/// Returns (requested, met).
fn expectations(prompt: &TextProfile, response: &TextProfile) -> (usize, usize) {
    let mut requested = 0;
    let mut met = 0;
    for (re, kind) in EXPECTATION_TABLE.iter() {
        if !re.is_match(&prompt.lower) {
            continue;
        }
        requested += 1;
        let satisfied = match kind {
            Expectation::List => response.list_items > 0,
            Expectation::Brief => response.word_count() < BRIEF_MAX_WORDS,
            Expectation::Long => response.word_count() > LONG_MIN_WORDS,
            Expectation::Echo => re.is_match(&response.lower),
        };
        if satisfied {
            met += 1;
        }
    }
    (requested, met)
}

fn expectation_sync(requested: usize, met: usize) -> f64 {
    if requested == 0 {
        0.7
    } else if met == 0 {
        0.4
    } else {
        (0.5 + met as f64 * 0.2).min(1.0)
    }
}

/// Response length the prompt's length suggests.
fn ideal_response_words(prompt_words: usize) -> f64 {
    if prompt_words < 10 {
        50.0
    } else if prompt_words < 30 {
        100.0
    } else {
        200.0
    }
}

fn depth_sync(prompt: &TextProfile, response: &TextProfile) -> f64 {
    let ratio = response.word_count() as f64 / ideal_response_words(prompt.word_count());
    if (0.7..=1.3).contains(&ratio) {
        0.9
    } else if (0.4..=1.6).contains(&ratio) {
        0.7
    } else {
        0.4
    }
}

fn sentence_similarity(prompt: &TextProfile, response: &TextProfile) -> f64 {
    let p = prompt.mean_sentence_length();
    let r = response.mean_sentence_length();
    let longest = p.max(r);
    if longest == 0.0 {
        return 0.0;
    }
    1.0 - (p - r).abs() / longest
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Analyzer for the SAS dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct SasAnalyzer;

impl DimensionAnalyzer for SasAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Sas
    }

    fn analyze(&self, _interaction: &Interaction, features: &FeatureSet) -> DimensionScore {
        if features.is_degenerate() {
            return DimensionScore::degenerate(
                Dimension::Sas,
                &TIERS,
                "Insufficient data - both prompt and response are needed",
            );
        }
        let prompt = &features.prompt;
        let response = &features.response;

        let user_style = style_profile(prompt);
        let ai_style = style_profile(response);
        let (requested, met) = expectations(prompt, response);

        let component_values = [
            style_sync(&user_style, &ai_style),
            features.lexical_overlap,
            sentence_similarity(prompt, response),
            goal_sync(prompt, response),
            expectation_sync(requested, met),
            depth_sync(prompt, response),
        ];
        let value: f64 = WEIGHTS
            .iter()
            .zip(component_values)
            .map(|((_, weight), score)| weight * score)
            .sum();
        let components: Components = WEIGHTS
            .iter()
            .zip(component_values)
            .map(|((name, _), score)| (*name, score))
            .collect();

        let shared = prompt.vocabulary.intersection(&response.vocabulary).count();
        let raw_counts = RawCounts::from([
            ("prompt_words", prompt.word_count()),
            ("response_words", response.word_count()),
            ("shared_vocabulary", shared),
            ("expectations_requested", requested),
            ("expectations_met", met),
        ]);

        let detail = format!(
            "{:.0}% vocabulary overlap ({} shared words), {}/{} format expectations met",
            features.lexical_overlap * 100.0,
            shared,
            met,
            requested
        );

        DimensionScore::new(Dimension::Sas, value, &TIERS, detail, raw_counts)
            .with_components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(prompt: &str, response: &str) -> DimensionScore {
        let interaction = Interaction::new(prompt, response);
        SasAnalyzer.analyze(&interaction, &FeatureSet::extract(&interaction))
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_when_either_side_empty() {
        assert!(score("", "Hello there.").label.is_lowest());
        assert!(score("Hello there.", "").label.is_lowest());
        assert_eq!(score("", "").value, 0.0);
    }

    #[test]
    fn test_mirrored_response_beats_unrelated_response() {
        let prompt = "Hey, can you list the key points of the rust borrow checker? Thanks!";
        let mirrored = score(
            prompt,
            "Hey! Key points of the rust borrow checker:\n- one owner\n- many readers\n- one writer",
        );
        let unrelated = score(
            prompt,
            "Consequently, the historical analysis of maritime trade statistics indicates \
             that 43.5% of routes were abandoned during the period under consideration, \
             furthermore the research data suggests a structural decline.",
        );
        assert!(mirrored.value > unrelated.value);
        assert!(mirrored.raw_counts["expectations_met"] >= 1);
    }

    #[test]
    fn test_expectation_sync_levels() {
        assert_eq!(expectation_sync(0, 0), 0.7);
        assert_eq!(expectation_sync(2, 0), 0.4);
        assert!((expectation_sync(2, 1) - 0.7).abs() < 1e-9);
        assert_eq!(expectation_sync(5, 4), 1.0);
    }

    #[test]
    fn test_style_profile_detects_data_driven() {
        let profile = style_profile(&TextProfile::new("The data shows 42% growth in the study."));
        assert!(profile[4] > 0.0);
        assert_eq!(profile[0], 0.0);
    }

    #[test]
    fn test_sentence_similarity_bounds() {
        let a = TextProfile::new("One two three.");
        let b = TextProfile::new("Four five six.");
        assert_eq!(sentence_similarity(&a, &b), 1.0);
        assert_eq!(sentence_similarity(&TextProfile::new(""), &TextProfile::new("")), 0.0);
    }
}
