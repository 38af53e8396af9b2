//! lutgen Core - Foundation types for LUT generation
//!
//! This crate provides the value types shared by every lutgen crate:
//! - Grading parameters with their neutral values and ranges
//! - RGB samples flowing through the transform pipeline
//! - Validated cube sizes and suggested output filenames
//! - Versioned preset files

pub mod cube_size;
pub mod error;
pub mod params;
pub mod preset;
pub mod sample;

pub use cube_size::CubeSize;
pub use error::{LutgenError, Result};
pub use params::{ColorParameters, Parameter};
pub use preset::{Preset, PresetFile};
pub use sample::ColorSample;
