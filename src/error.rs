use thiserror::Error;

/// Errors raised by the engine's pure operations.
///
/// All of them are local and recoverable: the caller re-prompts for input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid health profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("invalid serving input: {reason}")]
    InvalidServingInput { reason: String },

    #[error("allergen term {term:?} cannot be matched: {reason}")]
    MalformedAllergenTerm { term: String, reason: String },
}

impl EngineError {
    pub fn invalid_profile(reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            reason: reason.into(),
        }
    }

    pub fn invalid_serving(reason: impl Into<String>) -> Self {
        Self::InvalidServingInput {
            reason: reason.into(),
        }
    }

    pub fn malformed_allergen(term: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAllergenTerm {
            term: term.into(),
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
