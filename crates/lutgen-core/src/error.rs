//! Error types for lutgen.

use thiserror::Error;

use crate::params::Parameter;

/// Main error type for lutgen request validation and persistence.
#[derive(Error, Debug)]
pub enum LutgenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cube size {size}: a LUT needs at least 2 samples per axis")]
    InvalidCubeSize { size: usize },

    #[error("Invalid cube size {size}: the largest supported size is {max}")]
    CubeSizeTooLarge { size: usize, max: usize },

    #[error("Cube size is not an integer: {0:?}")]
    MalformedCubeSize(String),

    #[error("Invalid parameter {parameter}: value {value} is not finite")]
    NonFiniteParameter { parameter: Parameter, value: f64 },

    #[error("Invalid parameter {parameter}: {text:?} is not a number")]
    InvalidParameterValue { parameter: Parameter, text: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for lutgen operations.
pub type Result<T> = std::result::Result<T, LutgenError>;
