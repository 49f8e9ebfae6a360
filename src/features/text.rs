//! Tokenization, sentence splitting and per-text statistics.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9']+").unwrap());
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*]|\d+\.)[ \t]+\S").unwrap());

/// Lower-case `text` and fold typographic apostrophes into `'`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

/// Split text into lower-cased word tokens.
///
/// Apostrophes stay inside a token so "let's" is one word; leading and
/// trailing apostrophes are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = normalize(text);
    WORD.find_iter(&lower)
        .map(|m| m.as_str().trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split text into trimmed, non-empty sentences on runs of `.`, `!`, `?`.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read-only statistics for one side of an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextProfile {
    /// Input text, case preserved.
    pub raw: String,
    /// Normalized text used for phrase matching.
    pub lower: String,
    /// Word tokens in order.
    pub tokens: Vec<String>,
    /// Lower-cased sentences.
    pub sentences: Vec<String>,
    /// Word count of each sentence that contains at least one word.
    pub sentence_lengths: Vec<usize>,
    /// Distinct tokens.
    pub vocabulary: BTreeSet<String>,
    pub question_marks: usize,
    pub paragraphs: usize,
    pub list_items: usize,
}

impl TextProfile {
    /// Compute the profile of `text`.
    pub fn new(text: &str) -> Self {
        let lower = normalize(text);
        let tokens = tokenize(&lower);
        let sentences = split_sentences(&lower);
        let sentence_lengths: Vec<usize> = sentences
            .iter()
            .map(|s| tokenize(s).len())
            .filter(|&n| n > 0)
            .collect();
        let vocabulary: BTreeSet<String> = tokens.iter().cloned().collect();
        let paragraphs = PARAGRAPH_BREAK
            .split(text)
            .filter(|p| !p.trim().is_empty())
            .count();

        Self {
            raw: text.to_string(),
            question_marks: text.matches('?').count(),
            list_items: LIST_ITEM.find_iter(text).count(),
            lower,
            tokens,
            sentences,
            sentence_lengths,
            vocabulary,
            paragraphs,
        }
    }

    /// True when the text carries no words at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_lengths.len()
    }

    /// Mean words per sentence, or 0 for empty text.
    pub fn mean_sentence_length(&self) -> f64 {
        if self.sentence_lengths.is_empty() {
            return 0.0;
        }
        let total: usize = self.sentence_lengths.iter().sum();
        total as f64 / self.sentence_lengths.len() as f64
    }

    /// Ratio of the longest to the shortest sentence (in words).
    ///
    /// Returns 1.0 when there are fewer than two sentences.
    pub fn sentence_length_spread(&self) -> f64 {
        let longest = self.sentence_lengths.iter().copied().max().unwrap_or(0);
        let shortest = self.sentence_lengths.iter().copied().min().unwrap_or(0);
        if self.sentence_lengths.len() < 2 || shortest == 0 {
            return 1.0;
        }
        longest as f64 / shortest as f64
    }
}

/// Share of the prompt's vocabulary that reappears in the response.
///
/// Zero when the prompt has no vocabulary.
pub fn lexical_overlap(prompt: &TextProfile, response: &TextProfile) -> f64 {
    if prompt.vocabulary.is_empty() {
        return 0.0;
    }
    let shared = prompt.vocabulary.intersection(&response.vocabulary).count();
    shared as f64 / prompt.vocabulary.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_contractions() {
        assert_eq!(
            tokenize("Let's build it, OK?"),
            vec!["let's", "build", "it", "ok"]
        );
    }

    #[test]
    fn test_typographic_apostrophes_are_folded() {
        assert_eq!(tokenize("Let\u{2019}s go"), vec!["let's", "go"]);
        let profile = TextProfile::new("I\u{2019}m sure you\u{2019}re right");
        assert_eq!(profile.lower, "i'm sure you're right");
        assert!(profile.vocabulary.contains("you're"));
    }

    #[test]
    fn test_split_sentences_collapses_runs() {
        assert_eq!(
            split_sentences("One. Two!! Three?.. "),
            vec!["One", "Two", "Three"]
        );
    }

    #[test]
    fn test_profile_statistics() {
        let profile = TextProfile::new("First line here.\n\n- item one\n- item two\nDone?");
        assert_eq!(profile.paragraphs, 2);
        assert_eq!(profile.list_items, 2);
        assert_eq!(profile.question_marks, 1);
        assert_eq!(profile.sentence_count(), 2);
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_empty_profile() {
        let profile = TextProfile::new("");
        assert!(profile.is_empty());
        assert_eq!(profile.mean_sentence_length(), 0.0);
        assert_eq!(profile.sentence_length_spread(), 1.0);
        assert_eq!(profile.paragraphs, 0);
    }

    #[test]
    fn test_lexical_overlap() {
        let prompt = TextProfile::new("rust borrow checker");
        let response = TextProfile::new("The borrow checker enforces ownership.");
        let overlap = lexical_overlap(&prompt, &response);
        assert!((overlap - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(lexical_overlap(&TextProfile::new(""), &response), 0.0);
    }
}
