//! Grading transform pipeline: a fixed-order chain of grading stages.

use lutgen_core::{ColorParameters, ColorSample};

use crate::stages::{
    apply_contrast, apply_saturation, black_white_points, exposure_gain, gain_kernel,
    remap_kernel, rolloff_exponents, rolloff_kernel, temperature_gains, temperature_kernel,
};

/// A single grading operation with its coefficients precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Exposure { gain: f64 },
    Temperature { red_gain: f64, blue_gain: f64 },
    Contrast { contrast: f64 },
    HighlightsShadows { shadow_exponent: f64, highlight_exponent: f64 },
    BlacksWhites { black_point: f64, white_point: f64 },
    Saturation { saturation: f64 },
    Intensity { intensity: f64 },
}

impl Stage {
    /// Stage name for logs and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Exposure { .. } => "exposure",
            Self::Temperature { .. } => "temperature",
            Self::Contrast { .. } => "contrast",
            Self::HighlightsShadows { .. } => "highlights_shadows",
            Self::BlacksWhites { .. } => "blacks_whites",
            Self::Saturation { .. } => "saturation",
            Self::Intensity { .. } => "intensity",
        }
    }

    /// Apply this stage to one sample.
    #[inline]
    pub fn apply(&self, s: ColorSample) -> ColorSample {
        match *self {
            Self::Exposure { gain } => gain_kernel(s, gain),
            Self::Temperature {
                red_gain,
                blue_gain,
            } => temperature_kernel(s, red_gain, blue_gain),
            Self::Contrast { contrast } => apply_contrast(s, contrast),
            Self::HighlightsShadows {
                shadow_exponent,
                highlight_exponent,
            } => rolloff_kernel(s, shadow_exponent, highlight_exponent),
            Self::BlacksWhites {
                black_point,
                white_point,
            } => remap_kernel(s, black_point, white_point),
            Self::Saturation { saturation } => apply_saturation(s, saturation),
            Self::Intensity { intensity } => gain_kernel(s, intensity),
        }
    }
}

/// The grading transform for one parameter set.
///
/// Stage order is fixed: exposure, temperature, contrast,
/// highlights/shadows, blacks/whites, saturation, intensity. Each stage's
/// input assumptions depend on the stage before it.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingPipeline {
    stages: [Stage; 7],
}

impl GradingPipeline {
    /// Build the stage chain for `params`.
    ///
    /// The parameters are not validated here; callers generating a LUT go
    /// through [`LutDocument::generate`](crate::lut::LutDocument::generate).
    pub fn new(params: &ColorParameters) -> Self {
        let (red_gain, blue_gain) = temperature_gains(params.temperature);
        let (shadow_exponent, highlight_exponent) =
            rolloff_exponents(params.highlights, params.shadows);
        let (black_point, white_point) = black_white_points(params.blacks, params.whites);

        Self {
            stages: [
                Stage::Exposure {
                    gain: exposure_gain(params.exposure),
                },
                Stage::Temperature {
                    red_gain,
                    blue_gain,
                },
                Stage::Contrast {
                    contrast: params.contrast,
                },
                Stage::HighlightsShadows {
                    shadow_exponent,
                    highlight_exponent,
                },
                Stage::BlacksWhites {
                    black_point,
                    white_point,
                },
                Stage::Saturation {
                    saturation: params.saturation,
                },
                Stage::Intensity {
                    intensity: params.intensity,
                },
            ],
        }
    }

    /// The stages in application order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run a sample through every stage. The result is not clamped.
    pub fn process(&self, s: ColorSample) -> ColorSample {
        self.stages.iter().fold(s, |acc, stage| stage.apply(acc))
    }

    /// Run a sample through every stage and clamp the result to [0, 1].
    #[inline]
    pub fn process_clamped(&self, s: ColorSample) -> ColorSample {
        self.process(s).clamp_unit()
    }

    /// Transform a buffer of samples in place, clamping each result.
    pub fn process_buffer(&self, data: &mut [ColorSample]) {
        for sample in data.iter_mut() {
            *sample = self.process_clamped(*sample);
        }
    }

    /// Intermediate value after every stage, for diagnostics.
    pub fn trace(&self, s: ColorSample) -> Vec<(&'static str, ColorSample)> {
        let mut current = s;
        self.stages
            .iter()
            .map(|stage| {
                current = stage.apply(current);
                (stage.name(), current)
            })
            .collect()
    }
}

/// Transform a single sample with `params`. The result is not clamped.
pub fn transform(s: ColorSample, params: &ColorParameters) -> ColorSample {
    GradingPipeline::new(params).process(s)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use lutgen_core::Parameter;
    use proptest::prelude::*;

    fn unit_sample() -> impl Strategy<Value = ColorSample> {
        (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64).prop_map(|(r, g, b)| ColorSample::new(r, g, b))
    }

    fn in_range(p: Parameter) -> impl Strategy<Value = f64> {
        let (min, max) = p.range();
        min..=max
    }

    fn params_in_range() -> impl Strategy<Value = ColorParameters> {
        (
            (
                in_range(Parameter::Contrast),
                in_range(Parameter::Saturation),
                in_range(Parameter::Temperature),
                in_range(Parameter::Exposure),
                in_range(Parameter::Highlights),
            ),
            (
                in_range(Parameter::Shadows),
                in_range(Parameter::Whites),
                in_range(Parameter::Blacks),
                in_range(Parameter::Intensity),
            ),
        )
            .prop_map(
                |(
                    (contrast, saturation, temperature, exposure, highlights),
                    (shadows, whites, blacks, intensity),
                )| ColorParameters {
                    contrast,
                    saturation,
                    temperature,
                    exposure,
                    highlights,
                    shadows,
                    whites,
                    blacks,
                    intensity,
                },
            )
    }

    proptest! {
        #[test]
        fn neutral_is_identity(s in unit_sample()) {
            let out = GradingPipeline::new(&ColorParameters::NEUTRAL).process(s);
            prop_assert!(out.max_abs_diff(s) < 1e-6, "{:?} -> {:?}", s, out);
        }

        #[test]
        fn clamped_output_in_unit_range(params in params_in_range(), s in unit_sample()) {
            let out = GradingPipeline::new(&params).process_clamped(s);
            prop_assert!(out.is_within_unit(), "{:?} -> {:?}", s, out);
        }

        #[test]
        fn positive_exposure_never_darkens(exposure in 1e-3..=2.0f64, s in unit_sample()) {
            let params = ColorParameters::NEUTRAL.with(Parameter::Exposure, exposure);
            let out = GradingPipeline::new(&params).process(s);
            for (o, i) in out.to_array().into_iter().zip(s.to_array()) {
                prop_assert!(o >= i - 1e-12, "exposure {}: {:?} -> {:?}", exposure, s, out);
            }
        }

        #[test]
        fn degenerate_range_is_mid_gray(offset in -0.5e-6..0.5e-6f64, s in unit_sample()) {
            // white − black = 1 + (whites − blacks)/2 → choose whites − blacks ≈ −2
            let params = ColorParameters::NEUTRAL
                .with(Parameter::Blacks, 1.0)
                .with(Parameter::Whites, -1.0 + offset);
            let out = GradingPipeline::new(&params).process(s);
            prop_assert_eq!(out, ColorSample::MID_GRAY);
        }
    }
}
