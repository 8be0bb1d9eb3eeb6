//! Errors reported by rule handlers

use crate::logging::{codes, Code};

/// Failure reported by a rule handler for a line whose shape matched.
///
/// The driver records these exactly like unmatched lines and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("{message}")]
    Rejected { message: String },

    #[error("Invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },
}

impl HandlerError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn invalid_value(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn error_code(&self) -> Code {
        codes::grammar::HANDLER_REJECTED
    }
}
