//! The resonance engine.
//!
//! Runs one analysis end to end: feature extraction, the six dimension
//! analyzers, intent classification, alignment modulation and aggregation.
//! The engine holds only immutable analyzers, so one instance can be shared
//! behind an `Arc` and called from any number of threads.

use crate::aggregate;
use crate::alignment;
use crate::dimensions::{default_analyzers, DimensionAnalyzer, DimensionScores};
use crate::error::EngineResult;
use crate::features::FeatureSet;
use crate::intent;
use crate::report::AnalysisResult;
use crate::types::{AnalysisOptions, AnalysisRequest, Interaction};

/// Scores prompt/response pairs.
pub struct ResonanceEngine {
    /// One analyzer per dimension, in reporting order.
    analyzers: [Box<dyn DimensionAnalyzer>; 6],
}

impl ResonanceEngine {
    pub fn new() -> Self {
        Self {
            analyzers: default_analyzers(),
        }
    }

    /// Score one interaction.
    pub fn analyze(&self, interaction: &Interaction, options: &AnalysisOptions) -> AnalysisResult {
        let features = FeatureSet::extract(interaction);

        let scores = DimensionScores::from_array(
            self.analyzers
                .each_ref()
                .map(|analyzer| analyzer.analyze(interaction, &features)),
        );
        for score in scores.iter() {
            log::trace!(
                "{} = {:.3} ({}) {:?}",
                score.dimension,
                score.value,
                score.label,
                score.raw_counts
            );
        }

        let intent = intent::classify(interaction, &features);
        let alignment = alignment::modulate(&intent, &scores, &features);
        let resonance_index = aggregate::resonance_index(&scores, alignment.modulator);
        let interpretation = options
            .detailed_analysis
            .then(|| aggregate::interpret(&scores, &intent, &alignment));

        log::debug!(
            "Resonance index {:.3} (intent={}, confidence={:.3}, modulator={:.3})",
            resonance_index,
            intent.archetype,
            intent.confidence,
            alignment.modulator
        );

        AnalysisResult {
            scores,
            intent,
            alignment,
            resonance_index,
            interpretation,
        }
    }

    /// Validate a wire-level request and score it.
    pub fn analyze_request(&self, request: AnalysisRequest) -> EngineResult<AnalysisResult> {
        let (interaction, options) = request.into_parts()?;
        Ok(self.analyze(&interaction, &options))
    }
}

impl Default for ResonanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResonanceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dimensions: Vec<_> = self.analyzers.iter().map(|a| a.dimension()).collect();
        f.debug_struct("ResonanceEngine")
            .field("dimensions", &dimensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::Dimension;
    use crate::error::EngineError;
    use crate::intent::Archetype;

    const PROMPT: &str = "Let's build a study plan together for learning Rust. \
                          What do you think we should cover first?";
    const RESPONSE: &str = "Great idea! Think of it as a ladder: each rung builds on the last.\n\n\
                            1. First, we can cover ownership, which works like a library card.\n\
                            2. Next, traits and generics.\n\
                            3. Finally, async.\n\n\
                            Does this make sense? Let me know your thoughts and we can adjust.";

    fn engine() -> ResonanceEngine {
        ResonanceEngine::new()
    }

    #[test]
    fn test_all_values_in_unit_range() {
        let long = "word ".repeat(2000);
        let cases = [
            (PROMPT, RESPONSE),
            ("", ""),
            ("?", "!!!"),
            ("help", long.as_str()),
            ("Obviously broken error in my code", "Clearly you should know this."),
        ];
        for (prompt, response) in cases {
            let result = engine().analyze(
                &Interaction::new(prompt, response),
                &AnalysisOptions::detailed(),
            );
            for score in result.scores.iter() {
                assert!((0.0..=1.0).contains(&score.value), "{:?}", score);
            }
            assert!((0.0..=1.0).contains(&result.intent.confidence));
            assert!((0.0..=1.0).contains(&result.alignment.penalty));
            assert!((0.0..=1.0).contains(&result.alignment.modulator));
            assert!((0.0..=1.0).contains(&result.resonance_index));
        }
    }

    #[test]
    fn test_deterministic() {
        let interaction = Interaction::new(PROMPT, RESPONSE);
        let options = AnalysisOptions::detailed();
        let a = engine().analyze(&interaction, &options);
        let b = engine().analyze(&interaction, &options);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.to_report()).unwrap(),
            serde_json::to_string(&b.to_report()).unwrap()
        );
    }

    #[test]
    fn test_empty_interaction_is_lowest_everywhere() {
        let result = engine().analyze(&Interaction::new("", ""), &AnalysisOptions::default());
        for score in result.scores.iter() {
            assert!(score.label.is_lowest(), "{} not lowest", score.dimension);
            assert_eq!(score.value, 0.0);
        }
        assert_eq!(result.intent.archetype, Archetype::InformationSeeker);
        assert_eq!(result.intent.confidence, 0.0);
        assert_eq!(result.resonance_index, 0.0);
    }

    #[test]
    fn test_detailed_toggle() {
        let interaction = Interaction::new(PROMPT, RESPONSE);
        let plain = engine().analyze(&interaction, &AnalysisOptions::default());
        assert!(plain.interpretation.is_none());
        let json = serde_json::to_value(plain.to_report()).unwrap();
        assert!(json.get("detailed_analysis").is_none());

        let detailed = engine().analyze(&interaction, &AnalysisOptions::detailed());
        let lines = detailed.interpretation.as_ref().unwrap();
        assert_eq!(lines.len(), 7);
        for (line, dimension) in lines.iter().zip(Dimension::ALL) {
            assert!(line.starts_with(dimension.abbreviation()));
        }
        assert!(lines[6].starts_with("AM: "));
    }

    #[test]
    fn test_irrelevant_prompt_vocabulary_leaves_dimensions_unchanged() {
        let a = engine().analyze(
            &Interaction::new("Tell me about the green lighthouse.", "It stands on a cliff."),
            &AnalysisOptions::default(),
        );
        let b = engine().analyze(
            &Interaction::new("Tell me about the purple windmill.", "It stands on a cliff."),
            &AnalysisOptions::default(),
        );
        assert_eq!(a.scores.values(), b.scores.values());
    }

    #[test]
    fn test_collaborative_exchange() {
        let result = engine().analyze(&Interaction::new(PROMPT, RESPONSE), &AnalysisOptions::default());
        assert_eq!(result.intent.archetype, Archetype::CoCreationPartner);
        assert!(result.scores.cai.raw_counts["analogy"] >= 2);
        assert!(result.scores.cps.value >= 0.8);
        assert!(result.resonance_index > 0.0);
        let expected = aggregate::weighted_sum(&result.scores.values()) * result.alignment.modulator;
        assert!((result.resonance_index - expected).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_request_rejects_missing_fields() {
        let request = AnalysisRequest {
            user_prompt: None,
            ai_response: Some("hi".into()),
            options: AnalysisOptions::default(),
        };
        assert_eq!(
            engine().analyze_request(request).unwrap_err(),
            EngineError::missing("user_prompt")
        );
        assert!(engine().analyze_request(AnalysisRequest::new("a", "b")).is_ok());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResonanceEngine>();
    }
}
