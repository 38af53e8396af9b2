//! The seven grading adjustments, one function per stage.
//!
//! Each `apply_*` function takes the raw parameter value. The `*_kernel`
//! variants take the precomputed coefficient and are what
//! [`GradingPipeline`](crate::pipeline::GradingPipeline) calls per sample.
//!
//! Clamping is uneven: only the temperature stage (red and blue
//! channels) and the highlights/shadows stage clamp. Every other stage lets
//! values overshoot [0, 1].

use lutgen_core::sample::clamp_unit;
use lutgen_core::ColorSample;

/// Below this black-to-white distance the remap collapses to mid-gray.
pub const DEGENERATE_RANGE_EPSILON: f64 = 1e-6;

/// Stage 1: exposure in stops.
///
/// ```text
/// out = in × 2^exposure
/// ```
pub fn apply_exposure(s: ColorSample, exposure: f64) -> ColorSample {
    gain_kernel(s, exposure_gain(exposure))
}

/// Linear gain for `exposure` stops.
#[inline]
pub fn exposure_gain(exposure: f64) -> f64 {
    2.0_f64.powf(exposure)
}

/// Multiply every channel by `gain`. Shared by exposure and intensity.
#[inline]
pub fn gain_kernel(s: ColorSample, gain: f64) -> ColorSample {
    s.map(|v| v * gain)
}

/// Stage 2: temperature as a red/blue bias.
///
/// Red is scaled by `1 + 0.1·t` and blue by `1 − 0.1·t`; both are clamped to
/// [0, 1]. Green passes through unscaled and unclamped.
pub fn apply_temperature(s: ColorSample, temperature: f64) -> ColorSample {
    let (red_gain, blue_gain) = temperature_gains(temperature);
    temperature_kernel(s, red_gain, blue_gain)
}

/// `(red_gain, blue_gain)` for a temperature value.
#[inline]
pub fn temperature_gains(temperature: f64) -> (f64, f64) {
    (1.0 + 0.1 * temperature, 1.0 - 0.1 * temperature)
}

#[inline]
pub fn temperature_kernel(s: ColorSample, red_gain: f64, blue_gain: f64) -> ColorSample {
    ColorSample::new(clamp_unit(s.r * red_gain), s.g, clamp_unit(s.b * blue_gain))
}

/// Stage 3: linear contrast around mid-gray.
///
/// ```text
/// out = (in − 0.5) × contrast + 0.5
/// ```
pub fn apply_contrast(s: ColorSample, contrast: f64) -> ColorSample {
    s.map(|v| (v - 0.5) * contrast + 0.5)
}

/// Stage 4: dual-exponent highlight/shadow rolloff.
///
/// ```text
/// shadow_exp    = 0.5^(−shadows)
/// highlight_exp = 0.5^(highlights)
/// x   = clamp(clamp(in)^shadow_exp)
/// out = 1 − (1 − x)^highlight_exp
/// ```
///
/// 0 and 1 are fixed points when both parameters are neutral.
pub fn apply_highlights_shadows(s: ColorSample, highlights: f64, shadows: f64) -> ColorSample {
    let (shadow_exponent, highlight_exponent) = rolloff_exponents(highlights, shadows);
    rolloff_kernel(s, shadow_exponent, highlight_exponent)
}

/// `(shadow_exponent, highlight_exponent)` for the rolloff stage.
#[inline]
pub fn rolloff_exponents(highlights: f64, shadows: f64) -> (f64, f64) {
    (0.5_f64.powf(-shadows), 0.5_f64.powf(highlights))
}

#[inline]
pub fn rolloff_kernel(
    s: ColorSample,
    shadow_exponent: f64,
    highlight_exponent: f64,
) -> ColorSample {
    s.map(|v| {
        let lifted = clamp_unit(clamp_unit(v).powf(shadow_exponent));
        1.0 - (1.0 - lifted).powf(highlight_exponent)
    })
}

/// Stage 5: black/white point remap.
///
/// ```text
/// black = blacks × 0.5
/// white = 1 + whites × 0.5
/// out   = (in − black) / (white − black)
/// ```
///
/// If `|white − black| < 1e-6` every channel becomes exactly 0.5.
pub fn apply_blacks_whites(s: ColorSample, blacks: f64, whites: f64) -> ColorSample {
    let (black_point, white_point) = black_white_points(blacks, whites);
    remap_kernel(s, black_point, white_point)
}

/// `(black_point, white_point)` for the remap stage.
#[inline]
pub fn black_white_points(blacks: f64, whites: f64) -> (f64, f64) {
    (blacks * 0.5, 1.0 + whites * 0.5)
}

#[inline]
pub fn remap_kernel(s: ColorSample, black_point: f64, white_point: f64) -> ColorSample {
    let range = white_point - black_point;
    if range.abs() < DEGENERATE_RANGE_EPSILON {
        return ColorSample::MID_GRAY;
    }
    let scale = 1.0 / range;
    s.map(|v| (v - black_point) * scale)
}

/// Stage 6: saturation around BT.709 luminance.
///
/// ```text
/// L   = 0.2126 R + 0.7152 G + 0.0722 B
/// out = L + saturation × (in − L)
/// ```
pub fn apply_saturation(s: ColorSample, saturation: f64) -> ColorSample {
    let luma = s.luminance();
    s.map(|v| luma + saturation * (v - luma))
}

/// Stage 7: overall strength multiplier.
pub fn apply_intensity(s: ColorSample, intensity: f64) -> ColorSample {
    gain_kernel(s, intensity)
}
