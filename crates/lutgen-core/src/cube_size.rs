//! Validated 3D LUT cube sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LutgenError, Result};

/// Samples per axis of a 3D LUT lattice. Always in `2..=CubeSize::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CubeSize(usize);

impl CubeSize {
    /// Smallest meaningful lattice: one sample at each end of every axis.
    pub const MIN: usize = 2;

    /// Largest accepted lattice (256³ ≈ 16.7M records).
    pub const MAX: usize = 256;

    /// Sizes offered to users by the front ends.
    pub const OFFERED: [CubeSize; 3] = [CubeSize(17), CubeSize(33), CubeSize(65)];

    /// The size used when a request does not name one.
    pub const DEFAULT: CubeSize = CubeSize(33);

    /// Validate a requested size.
    pub fn new(size: usize) -> Result<Self> {
        if size < Self::MIN {
            return Err(LutgenError::InvalidCubeSize { size });
        }
        if size > Self::MAX {
            return Err(LutgenError::CubeSizeTooLarge {
                size,
                max: Self::MAX,
            });
        }
        Ok(Self(size))
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Distance between neighbouring lattice nodes in normalized units.
    #[inline]
    pub fn step(self) -> f64 {
        1.0 / (self.0 - 1) as f64
    }

    /// Total number of lattice nodes (N³).
    #[inline]
    pub const fn node_count(self) -> usize {
        self.0 * self.0 * self.0
    }

    /// Filename offered for a LUT of this size.
    pub fn suggested_filename(self) -> String {
        format!("generated_lut_{0}x{0}.cube", self.0)
    }
}

impl Default for CubeSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CubeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}x{0}", self.0)
    }
}

impl TryFrom<usize> for CubeSize {
    type Error = LutgenError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<CubeSize> for usize {
    fn from(size: CubeSize) -> Self {
        size.0
    }
}

impl FromStr for CubeSize {
    type Err = LutgenError;

    fn from_str(s: &str) -> Result<Self> {
        let size: usize = s
            .trim()
            .parse()
            .map_err(|_| LutgenError::MalformedCubeSize(s.to_string()))?;
        Self::new(size)
    }
}
