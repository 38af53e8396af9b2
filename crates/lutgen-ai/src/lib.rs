//! lutgen AI - suggested grading parameters from an image-understanding model
//!
//! The HTTP call itself lives outside this crate. What is here:
//! - Building the request body that asks the model for the nine parameters
//! - Unwrapping the model's response and recovering the JSON object in it
//! - Validating and clamping the suggested values into `ColorParameters`
//!
//! Suggested values are untrusted input and go through the same checks as
//! user-entered values.

pub mod error;
pub mod prompt;
pub mod response;
pub mod suggestion;

pub use error::{AiError, AiResult};
pub use prompt::{endpoint, SuggestionRequest, DEFAULT_MODEL};
pub use response::{
    extract_suggestion, parse_suggestion_json, parse_suggestion_source, SuggestionMap,
};
pub use suggestion::{apply_suggestion, SuggestionOutcome};
