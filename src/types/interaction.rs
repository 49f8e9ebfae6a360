//! Interaction input and per-call options.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One user prompt paired with one AI response.
///
/// Built per request and dropped once scoring completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// The user's prompt.
    pub prompt: String,
    /// The AI's response to that prompt.
    pub response: String,
}

impl Interaction {
    /// Create a new `Interaction`.
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
        }
    }
}

/// Options recognized by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Generate per-dimension interpretation strings.
    #[serde(default)]
    pub detailed_analysis: bool,
}

impl AnalysisOptions {
    /// Options with detailed analysis switched on.
    pub fn detailed() -> Self {
        Self {
            detailed_analysis: true,
        }
    }
}

/// Wire-level analysis request.
///
/// Text fields are optional here so that a missing or `null` value can be
/// rejected as [`EngineError::InvalidInput`] instead of failing to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    /// Build a request with both fields present.
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            user_prompt: Some(prompt.into()),
            ai_response: Some(response.into()),
            options: AnalysisOptions::default(),
        }
    }

    /// Validate the request and split it into the engine's inputs.
    pub fn into_parts(self) -> EngineResult<(Interaction, AnalysisOptions)> {
        let prompt = self
            .user_prompt
            .ok_or_else(|| EngineError::missing("user_prompt"))?;
        let response = self
            .ai_response
            .ok_or_else(|| EngineError::missing("ai_response"))?;
        Ok((Interaction::new(prompt, response), self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_options() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"user_prompt": "hi", "ai_response": "hello"}"#).unwrap();
        let (interaction, options) = req.into_parts().unwrap();
        assert_eq!(interaction.prompt, "hi");
        assert_eq!(interaction.response, "hello");
        assert!(!options.detailed_analysis);
    }

    #[test]
    fn test_null_prompt_is_invalid_input() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"user_prompt": null, "ai_response": "hello"}"#).unwrap();
        assert_eq!(
            req.into_parts().unwrap_err(),
            EngineError::InvalidInput {
                field: "user_prompt"
            }
        );
    }

    #[test]
    fn test_missing_response_is_invalid_input() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"user_prompt": "hi"}"#).unwrap();
        assert_eq!(
            req.into_parts().unwrap_err(),
            EngineError::missing("ai_response")
        );
    }

    #[test]
    fn test_empty_strings_are_accepted() {
        let (interaction, _) = AnalysisRequest::new("", "").into_parts().unwrap();
        assert_eq!(interaction, Interaction::new("", ""));
    }

    #[test]
    fn test_detailed_option_parses() {
        let req: AnalysisRequest = serde_json::from_str(
            r#"{"user_prompt": "a", "ai_response": "b", "options": {"detailed_analysis": true}}"#,
        )
        .unwrap();
        assert!(req.options.detailed_analysis);
    }
}
