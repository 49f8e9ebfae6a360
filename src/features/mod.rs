//! Shared text features.
//!
//! A [`FeatureSet`] is computed once per interaction and handed to every
//! analyzer by reference, so tokenization and anchor detection run a single
//! time per call.

pub mod anchors;
pub mod phrases;
pub mod text;

use serde::Serialize;

use crate::types::Interaction;

pub use anchors::{detect_anchors, Anchor, AnchorCounts, AnchorKind};
pub use phrases::{phrase_regex, PatternSet, PhraseSet};
pub use text::{lexical_overlap, normalize, split_sentences, tokenize, TextProfile};

/// Read-only features derived from one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSet {
    pub prompt: TextProfile,
    pub response: TextProfile,
    /// Validated anchors found in the response, in detection order.
    pub anchors: Vec<Anchor>,
    pub anchor_counts: AnchorCounts,
    /// `|prompt vocab ∩ response vocab| / |prompt vocab|`.
    pub lexical_overlap: f64,
}

impl FeatureSet {
    /// Extract all features for `interaction`.
    pub fn extract(interaction: &Interaction) -> Self {
        let prompt = TextProfile::new(&interaction.prompt);
        let response = TextProfile::new(&interaction.response);
        let anchors = detect_anchors(&interaction.response);
        let anchor_counts = AnchorCounts::from_anchors(&anchors);
        let lexical_overlap = lexical_overlap(&prompt, &response);

        Self {
            prompt,
            response,
            anchors,
            anchor_counts,
            lexical_overlap,
        }
    }

    /// True when either side has no words.
    pub fn is_degenerate(&self) -> bool {
        self.prompt.is_empty() || self.response.is_empty()
    }

    /// Response words per prompt word; `None` when the prompt is empty.
    pub fn length_ratio(&self) -> Option<f64> {
        if self.prompt.is_empty() {
            return None;
        }
        Some(self.response.word_count() as f64 / self.prompt.word_count() as f64)
    }
}
