//! Subcommand implementations.

pub mod generate;
pub mod inspect;
pub mod params;
pub mod preset;

use lutgen_core::{ColorParameters, Parameter};
use tracing::debug;

/// Apply `name=value` overrides in command-line order.
///
/// Overrides are user input and are not clamped; non-finite values are
/// caught by validation before generation.
pub fn apply_overrides(
    mut params: ColorParameters,
    overrides: &[(Parameter, f64)],
) -> ColorParameters {
    for &(parameter, value) in overrides {
        debug!(%parameter, value, "Override");
        params.set(parameter, value);
    }
    params
}
