//! `.cube` read-back errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid LUT: {0}")]
    InvalidLut(String),
    #[error("dimension mismatch: expected {expected} entries, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
