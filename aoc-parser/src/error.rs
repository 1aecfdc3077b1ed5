//! Error types for whole-input parsing

use thiserror::Error;

/// Error returned by [`parse_all`](crate::parse_all).
///
/// Lines and columns are 1-based. For token input every position is on
/// line 1 and the column is the token index plus one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar did not match
    #[error("Parse failed at line {line}, column {column} (offset {position})")]
    Failed {
        position: usize,
        line: usize,
        column: usize,
    },
    /// The grammar matched a prefix but input remains
    #[error("Unexpected trailing input at line {line}, column {column} (offset {position})")]
    TrailingInput {
        position: usize,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Offset into the input where the error was detected
    pub fn position(&self) -> usize {
        match self {
            ParseError::Failed { position, .. } | ParseError::TrailingInput { position, .. } => {
                *position
            }
        }
    }
}
