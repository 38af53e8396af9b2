//! Unwrapping the model's reply into a JSON object of suggested values.
//!
//! Models asked for "only JSON" still wrap it in prose or code fences often
//! enough that recovery is part of the contract:
//!
//! 1. The outermost `{...}` block in the text is tried first.
//! 2. Otherwise a leading ```` ```json ```` fence and a trailing ```` ``` ````
//!    are stripped and the remainder is parsed if it looks like an object.

use lutgen_core::Parameter;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{AiError, AiResult};

/// A suggestion as returned by the model: parameter name to raw value.
pub type SuggestionMap = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
    #[serde(rename = "safetyRatings")]
    safety_ratings: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Pull the suggestion object out of a `generateContent` response envelope.
pub fn extract_suggestion(envelope: &Value) -> AiResult<SuggestionMap> {
    let response: GenerateContentResponse = serde_json::from_value(envelope.clone())
        .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

    let first = response.candidates.first();
    let part = first
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.first());

    let Some(part) = part else {
        return Err(blocked_or_malformed(first, response.prompt_feedback.as_ref()));
    };

    if let Some(text) = part.get("text").and_then(Value::as_str) {
        debug!(chars = text.len(), "Model returned suggestion text");
        return parse_suggestion_json(text);
    }

    // Some replies carry the object directly instead of as text.
    match part.as_object() {
        Some(object) if starts_with_known_parameter(object) => {
            debug!("Using structured response part directly");
            Ok(object.clone())
        }
        _ => Err(AiError::MalformedResponse(
            "response part has no text and is not a parameter object".into(),
        )),
    }
}

/// The first key in document order names a parameter.
fn starts_with_known_parameter(object: &SuggestionMap) -> bool {
    object
        .keys()
        .next()
        .is_some_and(|key| Parameter::from_name(key).is_some())
}

fn blocked_or_malformed(
    candidate: Option<&Candidate>,
    feedback: Option<&PromptFeedback>,
) -> AiError {
    if let Some(candidate) = candidate {
        if let Some(reason) = candidate.finish_reason.as_deref().filter(|r| *r != "STOP") {
            let mut message = format!("generation stopped: {reason}");
            if let Some(ratings) = &candidate.safety_ratings {
                message.push_str(&format!(" (safety: {ratings})"));
            }
            return AiError::Blocked(message);
        }
    }
    if let Some(reason) = feedback.and_then(|f| f.block_reason.as_deref()) {
        return AiError::Blocked(format!("prompt blocked: {reason}"));
    }
    AiError::MalformedResponse("unexpected response structure".into())
}

/// Recover a JSON object from free-form model text.
pub fn parse_suggestion_json(text: &str) -> AiResult<SuggestionMap> {
    if let Some(block) = outer_brace_block(text) {
        match serde_json::from_str::<SuggestionMap>(block) {
            Ok(map) => return Ok(map),
            Err(e) => warn!(error = %e, "Extracted JSON block did not parse, trying cleaned text"),
        }
    }

    let cleaned = strip_code_fence(text);
    if cleaned.starts_with('{') && cleaned.ends_with('}') {
        return Ok(serde_json::from_str(cleaned)?);
    }
    Err(AiError::NotJson(truncate(cleaned, 80)))
}

/// Accept either a full response envelope or bare model text.
///
/// Used for suggestion files saved from a previous call.
pub fn parse_suggestion_source(text: &str) -> AiResult<SuggestionMap> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.get("candidates").is_some() || value.get("promptFeedback").is_some() {
            return extract_suggestion(&value);
        }
    }
    parse_suggestion_json(text)
}

/// From the first `{` to the last `}`, inclusive.
fn outer_brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn strip_code_fence(text: &str) -> &str {
    let text = text
        .strip_prefix("```json")
        .map(str::trim_start)
        .unwrap_or(text);
    let text = text.trim_end();
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
