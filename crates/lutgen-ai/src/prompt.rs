//! Request body for a `generateContent` call that asks an image model to
//! estimate grading parameters.

use lutgen_core::{ColorParameters, Parameter};
use serde::Serialize;
use tracing::debug;

use crate::error::{AiError, AiResult};

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Base URL of the model endpoints.
pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Output token cap for the suggestion reply.
pub const MAX_OUTPUT_TOKENS: u32 = 512;

/// Endpoint URL for `model`. The API key is appended by the transport.
pub fn endpoint(model: &str) -> String {
    format!("{API_BASE}/{model}:generateContent")
}

/// Prompt asking for one JSON object with every parameter.
///
/// Ranges and neutral values come from [`Parameter`], so the prompt always
/// matches what [`apply_suggestion`](crate::apply_suggestion) accepts.
pub fn prompt_text() -> String {
    let mut text = String::from(
        "Analyze the color grading style of the provided image. Estimate the parameters \
         needed to transform a neutral image to look like this one using the following controls.\n\n\
         Provide ONLY a valid JSON object with estimations for these parameters. Use the \
         specified keys and stay within the numerical ranges:\n\n",
    );
    for p in Parameter::ALL {
        let (min, max) = p.range();
        text.push_str(&format!(
            "* \"{}\": number (Range: {:.1} to {:.1}, {:.1} is neutral; {})\n",
            p.name(),
            min,
            max,
            p.neutral(),
            p.description()
        ));
    }
    text.push_str(
        "\nYour entire response MUST be only the JSON object itself. Start directly with '{' \
         and end directly with '}'. Do not include explanations, markdown formatting or code \
         fences.\n\nExample of a perfect response:\n",
    );
    text.push_str(&example_response());
    text.push('\n');
    text
}

fn example_response() -> String {
    let example = ColorParameters {
        contrast: 1.15,
        saturation: 1.3,
        temperature: 0.1,
        exposure: -0.1,
        highlights: -0.2,
        shadows: 0.15,
        whites: 0.05,
        blacks: -0.05,
        intensity: 1.0,
    };
    // Field order follows the struct, so this matches the parameter table.
    serde_json::to_string(&example).unwrap_or_default()
}

/// A `generateContent` request carrying the prompt and one inline image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    response_mime_type: String,
}

impl SuggestionRequest {
    /// Build a request for base64-encoded image `data` of type `mime_type`.
    pub fn new(mime_type: &str, data: &str) -> AiResult<Self> {
        if !mime_type.starts_with("image/") {
            return Err(AiError::InvalidImage(format!(
                "expected an image MIME type, got '{mime_type}'"
            )));
        }
        let data = data.trim();
        if data.is_empty() {
            return Err(AiError::InvalidImage("image data is empty".into()));
        }
        debug!(mime_type, bytes = data.len(), "Building suggestion request");

        Ok(Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt_text(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: data.to_string(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: "application/json".into(),
            },
        })
    }

    /// Build a request from a `data:image/...;base64,...` URL.
    pub fn from_data_url(url: &str) -> AiResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| AiError::InvalidImage("not a data URL".into()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| AiError::InvalidImage("data URL has no payload".into()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| AiError::InvalidImage("data URL is not base64-encoded".into()))?;
        Self::new(mime_type, data)
    }

    /// The request body as a JSON value.
    pub fn to_json(&self) -> AiResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
