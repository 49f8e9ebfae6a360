//! Error types for the resonance engine.
//!
//! The scoring pipeline itself is total; the only rejection happens while
//! turning a wire-level request into an [`Interaction`](crate::types::Interaction).

use thiserror::Error;

/// Errors surfaced by the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A required text field was missing from the request.
    #[error("Invalid input: {field} is required")]
    InvalidInput { field: &'static str },
}

impl EngineError {
    /// Shorthand for a missing-field rejection.
    pub fn missing(field: &'static str) -> Self {
        EngineError::InvalidInput { field }
    }
}

/// Result alias used at the engine boundary.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = EngineError::missing("user_prompt");
        assert_eq!(err.to_string(), "Invalid input: user_prompt is required");
    }
}
