//! lutgen Color: grading transform pipeline and 3D LUT generation.

pub mod error;
pub mod lut;
pub mod pipeline;
pub mod stages;

pub use error::ColorError;
pub use lut::{generate_lut, lattice, LutArtifact, LutDocument, DEFAULT_TITLE};
pub use pipeline::{transform, GradingPipeline, Stage};
