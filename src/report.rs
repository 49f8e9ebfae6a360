//! Analysis results and their wire projection.
//!
//! [`AnalysisResult`] is what the engine returns; [`AnalysisReport`] is the
//! flat JSON shape sent to clients, with headline numbers rounded to three
//! decimals and the detailed block omitted unless it was requested.

use serde::Serialize;

use crate::alignment::{AlignmentResult, StyleScores};
use crate::dimensions::{Components, DimensionScore, DimensionScores, RawCounts};
use crate::intent::{Archetype, IntentResult};

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Full output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub scores: DimensionScores,
    pub intent: IntentResult,
    pub alignment: AlignmentResult,
    /// Weighted dimension sum times the alignment modulator, in [0, 1].
    pub resonance_index: f64,
    /// Present only when detailed analysis was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Vec<String>>,
}

impl AnalysisResult {
    /// Project into the wire format.
    pub fn to_report(&self) -> AnalysisReport {
        let detailed_analysis = self.interpretation.as_ref().map(|lines| DetailedAnalysis {
            interpretation: lines.clone(),
            component_breakdown: ComponentBreakdown::new(self),
        });

        AnalysisReport {
            resonance_index: round3(self.resonance_index),
            alignment_modulator: round3(self.alignment.modulator),
            user_intent_pattern: IntentPattern {
                detected: self.intent.archetype,
                confidence: round3(self.intent.confidence),
            },
            dimension_scores: DimensionValues::from(&self.scores),
            detailed_analysis,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub resonance_index: f64,
    pub alignment_modulator: f64,
    pub user_intent_pattern: IntentPattern,
    pub dimension_scores: DimensionValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_analysis: Option<DetailedAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentPattern {
    pub detected: Archetype,
    pub confidence: f64,
}

/// Dimension values rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionValues {
    pub iai: f64,
    pub cai: f64,
    pub pas: f64,
    pub sas: f64,
    pub cps: f64,
    pub css: f64,
}

impl From<&DimensionScores> for DimensionValues {
    fn from(scores: &DimensionScores) -> Self {
        Self {
            iai: round3(scores.iai.value),
            cai: round3(scores.cai.value),
            pas: round3(scores.pas.value),
            sas: round3(scores.sas.value),
            cps: round3(scores.cps.value),
            css: round3(scores.css.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedAnalysis {
    pub interpretation: Vec<String>,
    pub component_breakdown: ComponentBreakdown,
}

/// Per-dimension diagnostics plus the alignment details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentBreakdown {
    pub iai: DimensionBreakdown,
    pub cai: DimensionBreakdown,
    pub pas: DimensionBreakdown,
    pub sas: DimensionBreakdown,
    pub cps: DimensionBreakdown,
    pub css: DimensionBreakdown,
    pub alignment: AlignmentBreakdown,
}

impl ComponentBreakdown {
    fn new(result: &AnalysisResult) -> Self {
        let scores = &result.scores;
        Self {
            iai: DimensionBreakdown::from(&scores.iai),
            cai: DimensionBreakdown::from(&scores.cai),
            pas: DimensionBreakdown::from(&scores.pas),
            sas: DimensionBreakdown::from(&scores.sas),
            cps: DimensionBreakdown::from(&scores.cps),
            css: DimensionBreakdown::from(&scores.css),
            alignment: AlignmentBreakdown {
                penalty: round3(result.alignment.penalty),
                profile_distance: round3(result.alignment.profile_distance),
                style_match: round3(result.alignment.style_match),
                response_styles: result.alignment.response_styles,
                matched_intent_terms: result
                    .intent
                    .matched_terms
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionBreakdown {
    pub label: String,
    pub detail: String,
    pub raw_counts: RawCounts,
    #[serde(skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub components: Components,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

impl From<&DimensionScore> for DimensionBreakdown {
    fn from(score: &DimensionScore) -> Self {
        Self {
            label: score.label.name.to_string(),
            detail: score.detail.clone(),
            raw_counts: score.raw_counts.clone(),
            components: score
                .components
                .iter()
                .map(|(name, value)| (*name, round3(*value)))
                .collect(),
            evidence: score.evidence.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentBreakdown {
    pub penalty: f64,
    pub profile_distance: f64,
    pub style_match: f64,
    pub response_styles: StyleScores,
    pub matched_intent_terms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{Dimension, TierTable};

    static TABLE: TierTable = TierTable::new(&[(0.5, "High"), (0.0, "Low")]);

    fn result(interpretation: Option<Vec<String>>) -> AnalysisResult {
        let mut scores = DimensionScores::from_array(
            Dimension::ALL
                .map(|d| DimensionScore::new(d, 0.12345, &TABLE, "detail", RawCounts::new())),
        );
        scores.cai.evidence = vec!["analogy: think of it as a library".to_string()];
        AnalysisResult {
            scores,
            intent: IntentResult {
                archetype: Archetype::CoCreationPartner,
                confidence: 1.0 / 3.0,
                matched_terms: vec!["let's", "together"],
            },
            alignment: AlignmentResult {
                penalty: 0.2,
                modulator: 0.8,
                profile_distance: 0.1,
                style_match: 0.6,
                response_styles: StyleScores::default(),
            },
            resonance_index: 0.40600001,
            interpretation,
        }
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.40600001), 0.406);
        assert_eq!(round3(1.0 / 3.0), 0.333);
        assert_eq!(round3(0.0), 0.0);
    }

    #[test]
    fn test_report_omits_detailed_analysis_by_default() {
        let json = serde_json::to_value(result(None).to_report()).unwrap();
        assert_eq!(json["resonance_index"], 0.406);
        assert_eq!(json["alignment_modulator"], 0.8);
        assert_eq!(json["user_intent_pattern"]["detected"], "co_creation_partner");
        assert_eq!(json["user_intent_pattern"]["confidence"], 0.333);
        assert_eq!(json["dimension_scores"]["css"], 0.123);
        assert!(json.get("detailed_analysis").is_none());
    }

    #[test]
    fn test_report_includes_detailed_analysis_when_present() {
        let lines = vec!["IAI: Low - detail".to_string()];
        let json = serde_json::to_value(result(Some(lines)).to_report()).unwrap();
        let detailed = &json["detailed_analysis"];
        assert_eq!(detailed["interpretation"][0], "IAI: Low - detail");
        assert_eq!(detailed["component_breakdown"]["cai"]["label"], "Low");
        assert_eq!(
            detailed["component_breakdown"]["cai"]["evidence"][0],
            "analogy: think of it as a library"
        );
        assert!(detailed["component_breakdown"]["iai"].get("evidence").is_none());
        assert_eq!(
            detailed["component_breakdown"]["alignment"]["matched_intent_terms"][1],
            "together"
        );
    }
}
