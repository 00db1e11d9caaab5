//! Error types for the alignment engine

use thiserror::Error;

/// Errors that can occur while aligning two sequences
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// Empty sequence, or a sequence containing the gap symbol
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal consistency failure between the matrix, traceback and statistics.
    /// Indicates a programming defect rather than bad user input.
    #[error("Malformed alignment: {0}")]
    MalformedAlignment(String),

    #[error("Alignment matrix of {rows}x{cols} cells exceeds the limit of {limit} cells")]
    MatrixTooLarge {
        rows: usize,
        cols: usize,
        limit: usize,
    },
}

impl AlignError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedAlignment(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
