//! Error types for textgcn.

use thiserror::Error;

/// Crate error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Candle tensor error.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// Invalid configuration, rejected at construction time.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Two operands disagree on a dimension during forward evaluation.
    #[error("dimension mismatch: {left} vs {right}, expected {expected}, got {got}")]
    DimensionMismatch {
        /// The operand whose dimension was inspected.
        left: String,
        /// The operand it must agree with.
        right: String,
        expected: usize,
        got: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
