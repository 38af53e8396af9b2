//! Grading parameters: the nine scalar controls that define a LUT.
//!
//! `ColorParameters` is the single input of the transform pipeline. It is a
//! plain `Copy` value: built once per generation request, validated at the
//! request boundary, and never mutated while the lattice is traversed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LutgenError, Result};

/// Names one field of [`ColorParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Contrast,
    Saturation,
    Temperature,
    Exposure,
    Highlights,
    Shadows,
    Whites,
    Blacks,
    Intensity,
}

impl Parameter {
    /// Every parameter, in display order.
    pub const ALL: [Parameter; 9] = [
        Parameter::Contrast,
        Parameter::Saturation,
        Parameter::Temperature,
        Parameter::Exposure,
        Parameter::Highlights,
        Parameter::Shadows,
        Parameter::Whites,
        Parameter::Blacks,
        Parameter::Intensity,
    ];

    /// Field name as used in presets, suggestions and the CLI.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Temperature => "temperature",
            Self::Exposure => "exposure",
            Self::Highlights => "highlights",
            Self::Shadows => "shadows",
            Self::Whites => "whites",
            Self::Blacks => "blacks",
            Self::Intensity => "intensity",
        }
    }

    /// Value at which this parameter has no effect.
    pub const fn neutral(self) -> f64 {
        match self {
            Self::Contrast | Self::Saturation | Self::Intensity => 1.0,
            _ => 0.0,
        }
    }

    /// Documented `(min, max)` range.
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Contrast => (0.5, 1.5),
            Self::Saturation => (0.0, 2.0),
            Self::Temperature => (-1.0, 1.0),
            Self::Exposure => (-2.0, 2.0),
            Self::Highlights => (-1.0, 1.0),
            Self::Shadows => (-1.0, 1.0),
            Self::Whites => (-0.5, 0.5),
            Self::Blacks => (-0.5, 0.5),
            Self::Intensity => (0.5, 1.5),
        }
    }

    /// Short description for help output.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Contrast => "gain around mid-gray",
            Self::Saturation => "chroma scale around luminance",
            Self::Temperature => "red/blue channel bias (+ warm, - cool)",
            Self::Exposure => "stops of linear gain",
            Self::Highlights => "rolloff of bright tones",
            Self::Shadows => "lift of dark tones",
            Self::Whites => "white point offset",
            Self::Blacks => "black point offset",
            Self::Intensity => "overall effect strength multiplier",
        }
    }

    /// Exact, case-sensitive lookup by field name.
    ///
    /// Used for JSON objects, where keys must match the serialized field
    /// names. Command-line input goes through the lenient `FromStr`.
    pub fn from_name(name: &str) -> Option<Self> {
        Parameter::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Clamp `value` into the documented range.
    pub fn clamp(self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = LutgenError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Parameter::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| LutgenError::UnknownParameter(key.to_string()))
    }
}

/// The nine grading controls.
///
/// Fields missing from a serialized preset take their neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorParameters {
    /// Gain around mid-gray. 1.0 = neutral.
    pub contrast: f64,
    /// Chroma scale around luminance. 1.0 = neutral.
    pub saturation: f64,
    /// Red/blue bias. 0.0 = neutral.
    pub temperature: f64,
    /// Stops of linear gain. 0.0 = neutral.
    pub exposure: f64,
    /// Highlight rolloff. 0.0 = neutral.
    pub highlights: f64,
    /// Shadow lift. 0.0 = neutral.
    pub shadows: f64,
    /// White point offset. 0.0 = neutral.
    pub whites: f64,
    /// Black point offset. 0.0 = neutral.
    pub blacks: f64,
    /// Overall strength multiplier. 1.0 = neutral.
    pub intensity: f64,
}

impl ColorParameters {
    /// The identity parameter set.
    pub const NEUTRAL: Self = Self {
        contrast: 1.0,
        saturation: 1.0,
        temperature: 0.0,
        exposure: 0.0,
        highlights: 0.0,
        shadows: 0.0,
        whites: 0.0,
        blacks: 0.0,
        intensity: 1.0,
    };

    /// Read one field.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Contrast => self.contrast,
            Parameter::Saturation => self.saturation,
            Parameter::Temperature => self.temperature,
            Parameter::Exposure => self.exposure,
            Parameter::Highlights => self.highlights,
            Parameter::Shadows => self.shadows,
            Parameter::Whites => self.whites,
            Parameter::Blacks => self.blacks,
            Parameter::Intensity => self.intensity,
        }
    }

    /// Write one field.
    pub fn set(&mut self, parameter: Parameter, value: f64) {
        let slot = match parameter {
            Parameter::Contrast => &mut self.contrast,
            Parameter::Saturation => &mut self.saturation,
            Parameter::Temperature => &mut self.temperature,
            Parameter::Exposure => &mut self.exposure,
            Parameter::Highlights => &mut self.highlights,
            Parameter::Shadows => &mut self.shadows,
            Parameter::Whites => &mut self.whites,
            Parameter::Blacks => &mut self.blacks,
            Parameter::Intensity => &mut self.intensity,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        self.set(parameter, value);
        self
    }

    /// Iterate `(parameter, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        Parameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// True if every field sits at its neutral value.
    pub fn is_neutral(&self) -> bool {
        self.iter().all(|(p, v)| v == p.neutral())
    }

    /// Reject any non-finite field, naming the first offender.
    pub fn validate(&self) -> Result<()> {
        match self.iter().find(|(_, v)| !v.is_finite()) {
            Some((parameter, value)) => Err(LutgenError::NonFiniteParameter { parameter, value }),
            None => Ok(()),
        }
    }

    /// Copy with every field clamped into its documented range.
    ///
    /// Non-finite fields are left untouched.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for (p, v) in self.iter() {
            if v.is_finite() {
                out.set(p, p.clamp(v));
            }
        }
        out
    }
}

impl Default for ColorParameters {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Parse a `name=value` assignment such as `exposure=0.5`.
pub fn parse_assignment(text: &str) -> Result<(Parameter, f64)> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| LutgenError::UnknownParameter(text.to_string()))?;
    let parameter: Parameter = name.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| LutgenError::InvalidParameterValue {
            parameter,
            text: value.trim().to_string(),
        })?;
    Ok((parameter, value))
}
