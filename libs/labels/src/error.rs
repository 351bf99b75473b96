//! Error types for label expression parsing.

use thiserror::Error;

/// Errors that can occur when parsing a label expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The expression string is empty or only whitespace.
    #[error("label expression cannot be empty")]
    Empty,

    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A token that is not valid in this position.
    #[error("unexpected '{found}' at offset {offset}: expected {expected}")]
    UnexpectedToken {
        found: String,
        offset: usize,
        expected: &'static str,
    },

    /// The input ended while more was expected.
    #[error("unexpected end of expression: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A quoted atom is missing its closing quote.
    #[error("unterminated quoted label starting at offset {offset}")]
    UnterminatedQuote { offset: usize },
}

impl LabelError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, LabelError::Empty)
    }

    /// Byte offset of the offending input, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            LabelError::UnexpectedChar { offset, .. }
            | LabelError::UnexpectedToken { offset, .. }
            | LabelError::UnterminatedQuote { offset } => Some(*offset),
            LabelError::Empty | LabelError::UnexpectedEnd { .. } => None,
        }
    }
}
