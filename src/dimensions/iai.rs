//! Input Alignment Index (IAI).
//!
//! Scores the user's prompt on its own: does it give context, ask for
//! something specific, read cleanly, carry some structure, say enough, and
//! ask clearly. Short, vague prompts land in the bottom tier.

use once_cell::sync::Lazy;

use super::{
    Components, Dimension, DimensionAnalyzer, DimensionScore, RawCounts, TierTable,
};
use crate::features::{FeatureSet, PhraseSet};
use crate::types::Interaction;

static TIERS: TierTable = TierTable::new(&[
    (0.8, "Excellent"),
    (0.6, "Good"),
    (0.4, "Moderate"),
    (0.0, "Poor"),
]);

/// Component weights; they sum to 1.0.
pub const WEIGHTS: [(&str, f64); 6] = [
    ("context_completeness", 0.20),
    ("specificity", 0.25),
    ("language_quality", 0.20),
    ("structure", 0.15),
    ("information_sufficiency", 0.10),
    ("tone", 0.10),
];

const CONTEXT_MARKERS: &[&str] = &["for", "about", "context", "because", "since", "given"];
const CONCRETE_WORDS: &[&str] = &["specific", "exact", "precise", "concrete", "detailed"];
const PARAMETER_WORDS: &[&str] = &["number", "count", "length", "size", "time", "budget"];
const ORGANIZERS: &[&str] = &["first", "second", "then", "finally", "step", "steps"];
const CLARITY_INDICATORS: &[&str] = &["please", "clearly", "specifically"];

/// Word-count band that counts as "enough information".
const OPTIMAL_WORDS: (usize, usize) = (20, 150);

static CONTEXT: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(CONTEXT_MARKERS));
static CONCRETE: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(CONCRETE_WORDS));
static PARAMETERS: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(PARAMETER_WORDS));
static ORGANIZER: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(ORGANIZERS));
static CLARITY: Lazy<PhraseSet> = Lazy::new(|| PhraseSet::new(CLARITY_INDICATORS));

/// Analyzer for the IAI dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct IaiAnalyzer;

fn language_quality(words_per_sentence: f64) -> f64 {
    if words_per_sentence < 5.0 {
        0.3
    } else if words_per_sentence <= 20.0 {
        0.8
    } else if words_per_sentence <= 30.0 {
        0.5
    } else {
        0.2
    }
}

fn information_sufficiency(word_count: usize) -> f64 {
    let (min, max) = OPTIMAL_WORDS;
    if word_count < 5 {
        0.1
    } else if word_count < min {
        0.3 + (word_count as f64 / min as f64) * 0.3
    } else if word_count <= max {
        0.6 + ((word_count - min) as f64 / (max - min) as f64) * 0.3
    } else {
        0.9
    }
}

impl DimensionAnalyzer for IaiAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Iai
    }

    fn analyze(&self, _interaction: &Interaction, features: &FeatureSet) -> DimensionScore {
        let prompt = &features.prompt;
        if prompt.is_empty() {
            return DimensionScore::degenerate(
                Dimension::Iai,
                &TIERS,
                "No prompt text - nothing to align with",
            );
        }

        let text = prompt.lower.as_str();
        let words = prompt.word_count();
        let sentences = prompt.sentence_count().max(1);
        let context = CONTEXT.distinct_matches(text);
        let concrete = CONCRETE.distinct_matches(text);
        let parameters = PARAMETERS.distinct_matches(text);
        let organizers = ORGANIZER.distinct_matches(text);
        let clarity = CLARITY.distinct_matches(text);
        let has_question = prompt.question_marks > 0;

        let context_score = (context as f64 / 3.0).min(1.0);
        let specificity = ((concrete as f64 * 0.7 + parameters as f64 * 0.3) / 5.0).min(1.0);
        let language = language_quality(words as f64 / sentences as f64);
        let question_bonus = if has_question { 0.2 } else { 0.0 };
        let structure = ((organizers as f64 / 3.0).min(0.8) + question_bonus).min(1.0);
        let sufficiency = information_sufficiency(words);
        let tone = (0.6 + (clarity as f64 * 0.2).min(0.4)).min(1.0);

        let component_values = [
            context_score,
            specificity,
            language,
            structure,
            sufficiency,
            tone,
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
            ("words", words),
            ("sentences", prompt.sentence_count()),
            ("context_markers", context),
            ("concrete_words", concrete),
            ("parameters", parameters),
            ("organizers", organizers),
            ("clarity_indicators", clarity),
            ("questions", prompt.question_marks),
        ]);

        let detail = format!(
            "{} words in {} sentence(s); {} context markers, {} specificity markers, {} organizers",
            words,
            prompt.sentence_count(),
            context,
            concrete + parameters,
            organizers
        );

        DimensionScore::new(Dimension::Iai, value, &TIERS, detail, raw_counts)
            .with_components(components)
    }
}
