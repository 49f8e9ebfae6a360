//! Conceptual anchor detection.
//!
//! An anchor is a phrase that pins the response to a frame: a boundary
//! ("focusing on X", "rather than Y"), an analogy ("think of it as ...") or a
//! testable hypothesis ("if X, then Y"). Matching runs per sentence on
//! lower-cased text; each pattern match that survives validation counts once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::text::{normalize, split_sentences};

/// Anchor categories counted by the CAI analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Boundary,
    Analogy,
    Hypothesis,
}

impl AnchorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::Analogy => "analogy",
            Self::Hypothesis => "hypothesis",
        }
    }
}

/// A validated anchor occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub kind: AnchorKind,
    /// Cleaned matched text.
    pub text: String,
}

/// Per-category anchor counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorCounts {
    pub boundary: usize,
    pub analogy: usize,
    pub hypothesis: usize,
}

impl AnchorCounts {
    pub fn total(&self) -> usize {
        self.boundary + self.analogy + self.hypothesis
    }

    pub fn from_anchors(anchors: &[Anchor]) -> Self {
        let mut counts = Self::default();
        for anchor in anchors {
            match anchor.kind {
                AnchorKind::Boundary => counts.boundary += 1,
                AnchorKind::Analogy => counts.analogy += 1,
                AnchorKind::Hypothesis => counts.hypothesis += 1,
            }
        }
        counts
    }
}

const BOUNDARY_PATTERNS: &[&str] = &[
    r"\b(?:this is|we are|focus(?:ing)?|concentrat(?:ing|e)) (?:on|about) [^,]+",
    r"\b(?:not about|excluding|without|ignore) [^,]+",
    r"\b(?:scope is|limited to|specifically) [^,]+",
    r"\b(?:rather than|instead of) [^,]+",
    r"\b(?:this isn't about|this is not about) [^,]+",
];

const ANALOGY_PATTERNS: &[&str] = &[
    r"\b(?:like|similar to|comparable to) (?:an? )?[^,]+",
    r"\b(?:think of|imagine|picture) (?:it as |this as )?(?:an? )?[^,]+",
    r"\b(?:as if|as though) [^,]+",
    r"\b(?:analogous to|akin to) [^,]+",
    r"\b(?:metaphor|analogy) (?:of|for) [^,]+",
];

const HYPOTHESIS_PATTERNS: &[&str] = &[
    r"\b(?:if|when) [^,]+, (?:then )?[^,]+",
    r"\b(?:might|could|would|should) [^,]+? (?:if|when) [^,]+",
    r"\b(?:hypothesis|theory|assumption):? [^,]+",
    r"\b(?:we can test|let's test|test this by) [^,]+",
    r"\b(?:suppose|assuming) [^,]+",
];

/// Phrases that make an anchor too vague to count.
const BANNED_VAGUE_TERMS: &[&str] = &["this thing", "that stuff", "something"];

static ANCHOR_TABLE: Lazy<Vec<(AnchorKind, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
    };
    vec![
        (AnchorKind::Boundary, compile(BOUNDARY_PATTERNS)),
        (AnchorKind::Analogy, compile(ANALOGY_PATTERNS)),
        (AnchorKind::Hypothesis, compile(HYPOTHESIS_PATTERNS)),
    ]
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static LEADING_FILLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:and|or|but|so|then|also)\s+").unwrap());
static TRAILING_FILLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+(?:and|or|but|so|then|also)$").unwrap());

fn clean_anchor_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let trimmed = collapsed.trim();
    let leading = LEADING_FILLER.replace(trimmed, "");
    TRAILING_FILLER.replace(&leading, "").into_owned()
}

fn is_valid_anchor(kind: AnchorKind, text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return false;
    }
    if BANNED_VAGUE_TERMS.iter().any(|term| text.contains(term)) {
        return false;
    }
    match kind {
        AnchorKind::Analogy => words.iter().any(|w| w.chars().count() > 2),
        AnchorKind::Hypothesis => words.len() >= 2,
        AnchorKind::Boundary => true,
    }
}

/// Find every validated anchor in `text`, grouped by category in table order.
pub fn detect_anchors(text: &str) -> Vec<Anchor> {
    let lower = normalize(text);
    let sentences = split_sentences(&lower);
    let mut anchors = Vec::new();

    for (kind, patterns) in ANCHOR_TABLE.iter() {
        for pattern in patterns {
            for sentence in &sentences {
                for m in pattern.find_iter(sentence) {
                    let cleaned = clean_anchor_text(m.as_str());
                    if is_valid_anchor(*kind, &cleaned) {
                        anchors.push(Anchor {
                            kind: *kind,
                            text: cleaned,
                        });
                    }
                }
            }
        }
    }

    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(text: &str) -> AnchorCounts {
        AnchorCounts::from_anchors(&detect_anchors(text))
    }

    #[test]
    fn test_detects_each_category() {
        let c = counts(
            "We are focusing on the parser. Think of it as a conveyor belt. \
             If the input is empty, the parser returns early.",
        );
        assert_eq!(c.boundary, 1);
        assert_eq!(c.analogy, 1);
        assert_eq!(c.hypothesis, 1);
        assert_eq!(c.total(), 3);
    }

    #[test]
    fn test_vague_anchor_rejected() {
        let c = counts("It works like something.");
        assert_eq!(c.analogy, 0);
    }

    #[test]
    fn test_word_boundary_on_like() {
        // "unlike" must not open an analogy
        let c = counts("Unlike the old design, the cache is bounded.");
        assert_eq!(c.analogy, 0);
    }

    #[test]
    fn test_empty_text_has_no_anchors() {
        assert!(detect_anchors("").is_empty());
        assert_eq!(counts("").total(), 0);
    }

    #[test]
    fn test_anchor_text_is_cleaned() {
        let anchors = detect_anchors("Rather than   rewriting it and");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].text, "rather than rewriting it");
    }
}
