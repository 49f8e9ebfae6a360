//! Process Alignment Score (PAS).
//!
//! How natural and easy to follow the exchange feels: the response is scored
//! for chunking (paragraphs, transitions, lists), visible structure,
//! partnership language and conversational rhythm. Rhythm includes a pacing
//! check of the response's mean sentence length against the prompt's
//! register.

use once_cell::sync::Lazy;

use super::{
    Components, Dimension, DimensionAnalyzer, DimensionScore, RawCounts, TierTable,
};
use crate::features::{FeatureSet, PatternSet, PhraseSet, TextProfile};
use crate::types::Interaction;

static TIERS: TierTable = TierTable::new(&[
    (0.8, "Excellent"),
    (0.6, "Good"),
    (0.4, "Moderate"),
    (0.2, "Poor"),
    (0.0, "Very poor"),
]);

/// Component weights; they sum to 1.0.
pub const WEIGHTS: [(&str, f64); 4] = [
    ("chunking", 0.30),
    ("structure", 0.25),
    ("collaboration", 0.25),
    ("rhythm", 0.20),
];

const TRANSITION_WORDS: &[&str] = &[
    "first",
    "next",
    "then",
    "finally",
    "step",
    "phase",
    "however",
    "therefore",
    "for example",
    "in addition",
    "as a result",
];

const COLLABORATION_PHRASES: &[&str] = &[
    "let's",
    "we can",
    "we should",
    "our",
    "together",
    "collaborate",
    "what do you think",
    "how about",
    "your thoughts",
    "partner",
    "does this make sense",
    "shall we",
    "would you like",
    "build with",
];

const HEADING_PATTERNS: &[&str] = &[r"(?m)^#+", r"(?m)^[A-Z][^.!?\n]*:"];
const STRUCTURAL_LABELS: &[&str] = &[r"\b(?:table|chart|diagram|summary):"];
const PAUSE_PATTERNS: &[&str] = &[
    r"\.\.\.",
    "—",
    r"\bbriefly\b",
    r"\bin summary\b",
    r"\bto recap\b",
];

/// Sentence-length spread (longest / shortest) that reads as varied.
const GOOD_SPREAD: (f64, f64) = (2.0, 5.0);
/// Acceptable response/prompt mean sentence length ratio.
const PACING_RATIO: (f64, f64) = (0.5, 2.5);
/// Mean words per sentence accepted when the prompt gives no register.
const NEUTRAL_PACING: (f64, f64) = (8.0, 25.0);

static TRANSITIONS: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(TRANSITION_WORDS));
static COLLABORATION: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(COLLABORATION_PHRASES));
static HEADINGS: Lazy<PatternSet> = Lazy::new(|| PatternSet::new(HEADING_PATTERNS));
static LABELS: Lazy<PatternSet> = Lazy::new(|| PatternSet::new(STRUCTURAL_LABELS));
static PAUSES: Lazy<PatternSet> = Lazy::new(|| PatternSet::new(PAUSE_PATTERNS));

/// Analyzer for the PAS dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasAnalyzer;

fn chunking(response: &TextProfile, transitions: usize) -> f64 {
    let mut score: f64 = 0.0;
    if response.paragraphs > 1 {
        score += 0.3;
    }
    score += (transitions as f64 * 0.15).min(0.3);
    score += (response.list_items as f64 * 0.1).min(0.4);
    score.min(1.0)
}

fn structure(response: &TextProfile, has_headings: bool, has_labels: bool) -> f64 {
    let mut score: f64 = 0.0;
    if has_headings {
        score += 0.4;
    }
    score += match response.list_items {
        0 => 0.0,
        1 => 0.2,
        _ => 0.4,
    };
    if has_labels {
        score += 0.2;
    }
    score.min(1.0)
}

fn collaboration(phrases: usize) -> f64 {
    match phrases {
        0 => 0.1,
        1 => 0.4,
        2 => 0.7,
        _ => 1.0,
    }
}

fn in_band(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}

fn paced(prompt: &TextProfile, response: &TextProfile) -> bool {
    let response_mean = response.mean_sentence_length();
    if prompt.is_empty() {
        return in_band(response_mean, NEUTRAL_PACING);
    }
    in_band(response_mean / prompt.mean_sentence_length(), PACING_RATIO)
}

fn rhythm(prompt: &TextProfile, response: &TextProfile, pauses: usize) -> f64 {
    let mut score = (response.question_marks as f64 * 0.15).min(0.3);
    score += (pauses as f64 * 0.1).min(0.2);
    if response.sentence_count() >= 3 && in_band(response.sentence_length_spread(), GOOD_SPREAD) {
        score += 0.25;
    }
    if paced(prompt, response) {
        score += 0.25;
    }
    score.min(1.0)
}

impl DimensionAnalyzer for PasAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Pas
    }

    fn analyze(&self, _interaction: &Interaction, features: &FeatureSet) -> DimensionScore {
        let response = &features.response;
        if response.is_empty() {
            return DimensionScore::degenerate(
                Dimension::Pas,
                &TIERS,
                "No AI response provided - no process to assess",
            );
        }

        let transitions = TRANSITIONS.distinct_matches(&response.lower);
        let collaborative = COLLABORATION.distinct_matches(&response.lower);
        let pauses = PAUSES.total_matches(&response.lower);
        let has_headings = HEADINGS.contains_any(&response.raw);
        let has_labels = LABELS.contains_any(&response.lower);

        let component_values = [
            chunking(response, transitions),
            structure(response, has_headings, has_labels),
            collaboration(collaborative),
            rhythm(&features.prompt, response, pauses),
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

        let raw_counts = RawCounts::from([
            ("paragraphs", response.paragraphs),
            ("list_items", response.list_items),
            ("transitions", transitions),
            ("collaboration_phrases", collaborative),
            ("questions", response.question_marks),
            ("pauses", pauses),
            ("headings", usize::from(has_headings)),
        ]);

        let detail = format!(
            "{} paragraph(s), {} list item(s), {} transition(s), {} collaborative phrase(s), {} question(s)",
            response.paragraphs,
            response.list_items,
            transitions,
            collaborative,
            response.question_marks
        );

        DimensionScore::new(Dimension::Pas, value, &TIERS, detail, raw_counts)
            .with_components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(prompt: &str, response: &str) -> DimensionScore {
        let interaction = Interaction::new(prompt, response);
        PasAnalyzer.analyze(&interaction, &FeatureSet::extract(&interaction))
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_response_is_lowest_tier() {
        let s = score("How do I start?", "");
        assert_eq!(s.value, 0.0);
        assert_eq!(s.label.name, "Very poor");
    }

    #[test]
    fn test_structured_collaborative_response_beats_flat_one() {
        let prompt = "How should we plan the migration to the new database?";
        let flat = score(prompt, "Migrate it.");
        let rich = score(
            prompt,
            "Plan:\n\nFirst, let's list what we can move safely.\n- schema\n- data\n- jobs\n\n\
             Then we should test a dry run together. What do you think? \
             Does this make sense for our timeline?",
        );
        assert!(rich.value > flat.value);
        assert!(rich.raw_counts["collaboration_phrases"] >= 3);
        assert_eq!(rich.raw_counts["list_items"], 3);
        assert_eq!(rich.components["collaboration"], 1.0);
    }

    #[test]
    fn test_collaboration_steps() {
        assert_eq!(collaboration(0), 0.1);
        assert_eq!(collaboration(1), 0.4);
        assert_eq!(collaboration(2), 0.7);
        assert_eq!(collaboration(9), 1.0);
    }

    #[test]
    fn test_structure_adds_headings_lists_and_labels() {
        let flat = TextProfile::new("Just prose.");
        assert_eq!(structure(&flat, false, false), 0.0);

        let listed = TextProfile::new("Summary:\n- one\n- two");
        assert_eq!(listed.list_items, 2);
        assert!((structure(&listed, true, true) - 1.0).abs() < 1e-12);
        assert!((structure(&listed, false, false) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_typographic_apostrophe_counts_as_collaboration() {
        let straight = score("Can you help?", "Let's do it.");
        let curly = score("Can you help?", "Let\u{2019}s do it.");
        assert_eq!(straight.raw_counts["collaboration_phrases"], 1);
        assert_eq!(curly.raw_counts["collaboration_phrases"], 1);
        assert_eq!(curly.value, straight.value);
    }

    #[test]
    fn test_pacing_follows_prompt_register() {
        let prompt = TextProfile::new("Short question here?");
        let close = TextProfile::new("A short answer here. Another short one.");
        let far = TextProfile::new(
            "This single sentence keeps going and going with clause after clause and never \
             stops to let the reader breathe even once in all this time.",
        );
        assert!(paced(&prompt, &close));
        assert!(!paced(&prompt, &far));
    }
}
