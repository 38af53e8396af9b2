//! Folding a suggestion into the current parameters.

use lutgen_core::{ColorParameters, Parameter};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::response::SuggestionMap;

/// Result of applying a suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionOutcome {
    /// Parameters after the suggestion. Keys that were absent or rejected
    /// keep their prior values.
    pub params: ColorParameters,
    /// Parameters that took a suggested value.
    pub applied: Vec<Parameter>,
    /// Applied parameters whose suggested value was outside the range.
    pub clamped: Vec<Parameter>,
    /// Known parameters whose value was not a finite number.
    pub rejected: Vec<Parameter>,
    /// Keys that name no parameter.
    pub unknown: Vec<String>,
}

impl SuggestionOutcome {
    /// Number of parameters that took a suggested value.
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// True if nothing in the suggestion was usable.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Apply `suggestion` on top of `base`.
///
/// Keys must match a parameter name exactly. Values may be JSON numbers or
/// numeric strings. Anything else, and any
/// non-finite number, is skipped with a warning. Accepted values are clamped
/// into their parameter's range.
pub fn apply_suggestion(base: &ColorParameters, suggestion: &SuggestionMap) -> SuggestionOutcome {
    let mut outcome = SuggestionOutcome {
        params: *base,
        applied: Vec::new(),
        clamped: Vec::new(),
        rejected: Vec::new(),
        unknown: Vec::new(),
    };

    for (key, raw) in suggestion {
        let Some(parameter) = Parameter::from_name(key) else {
            warn!(key = %key, "Ignoring unexpected key in suggestion");
            outcome.unknown.push(key.clone());
            continue;
        };

        let Some(value) = numeric_value(raw).filter(|v| v.is_finite()) else {
            warn!(%parameter, value = %raw, "Ignoring non-numeric suggested value");
            outcome.rejected.push(parameter);
            continue;
        };

        let clamped = parameter.clamp(value);
        if clamped != value {
            debug!(%parameter, value, clamped, "Clamped suggested value into range");
            outcome.clamped.push(parameter);
        }
        outcome.params.set(parameter, clamped);
        outcome.applied.push(parameter);
    }

    info!(
        applied = outcome.applied.len(),
        rejected = outcome.rejected.len(),
        unknown = outcome.unknown.len(),
        "Applied suggestion"
    );
    outcome
}

fn numeric_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
