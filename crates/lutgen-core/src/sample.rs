//! RGB samples flowing through the transform pipeline.

use serde::{Deserialize, Serialize};

/// ITU-R BT.709 luminance weights.
pub const LUMA_REC709: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// An (R, G, B) triple with 64-bit float components.
///
/// Components are not restricted to [0, 1]: intermediate pipeline stages
/// may overshoot in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorSample {
    /// Create a new sample from RGB components.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a sample with the same value in every channel.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Luminance using BT.709 weights.
    #[inline]
    pub fn luminance(self) -> f64 {
        LUMA_REC709[0] * self.r + LUMA_REC709[1] * self.g + LUMA_REC709[2] * self.b
    }

    /// Apply `f` to every channel.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Clamp every channel to [0, 1].
    ///
    /// NaN maps to 0 and negative zero to positive zero, so the result always
    /// formats as a value inside the unit range.
    #[inline]
    pub fn clamp_unit(self) -> Self {
        self.map(clamp_unit)
    }

    /// True if every channel lies in [0, 1].
    pub fn is_within_unit(self) -> bool {
        self.to_array().iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Largest absolute per-channel difference to `other`.
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }

    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    // Common samples
    pub const BLACK: Self = Self::splat(0.0);
    pub const MID_GRAY: Self = Self::splat(0.5);
    pub const WHITE: Self = Self::splat(1.0);
}

impl From<[f64; 3]> for ColorSample {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<ColorSample> for [f64; 3] {
    fn from(s: ColorSample) -> Self {
        s.to_array()
    }
}

/// Clamp a single value to [0, 1].
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    // `+ 0.0` folds -0.0 into +0.0.
    v.clamp(0.0, 1.0) + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights_sum_to_one() {
        assert!((ColorSample::WHITE.luminance() - 1.0).abs() < 1e-12);
        assert_eq!(ColorSample::BLACK.luminance(), 0.0);
    }

    #[test]
    fn test_luminance_is_green_heavy() {
        let g = ColorSample::new(0.0, 1.0, 0.0).luminance();
        let r = ColorSample::new(1.0, 0.0, 0.0).luminance();
        let b = ColorSample::new(0.0, 0.0, 1.0).luminance();
        assert!(g > r && r > b);
    }

    #[test]
    fn test_clamp_unit() {
        let s = ColorSample::new(-0.2, 0.4, 1.7).clamp_unit();
        assert_eq!(s, ColorSample::new(0.0, 0.4, 1.0));
        assert!(s.is_within_unit());
    }

    #[test]
    fn test_clamp_unit_folds_negative_zero_and_nan() {
        let s = ColorSample::new(-0.0, f64::NAN, 0.5).clamp_unit();
        assert!(s.r.is_sign_positive());
        assert_eq!(format!("{:.6}", s.r), "0.000000");
        assert_eq!(s.g, 0.0);
    }

    #[test]
    fn test_array_conversion() {
        let s: ColorSample = [0.1, 0.2, 0.3].into();
        let back: [f64; 3] = s.into();
        assert_eq!(back, [0.1, 0.2, 0.3]);
    }
}
