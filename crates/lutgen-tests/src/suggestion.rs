//! Integration tests for the suggestion flow: response envelope through
//! parameter intake to a generated table.

use lutgen_ai::{
    apply_suggestion, extract_suggestion, parse_suggestion_source, AiError, SuggestionRequest,
};
use lutgen_color::LutDocument;
use lutgen_core::{ColorParameters, CubeSize, Parameter};
use serde_json::json;

fn envelope(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 1290, "candidatesTokenCount": 74 }
    })
}

#[test]
fn suggestion_drives_generation() {
    let reply = r#"{"contrast": 1.15, "saturation": 1.3, "temperature": 0.1, "exposure": -0.1,
        "highlights": -0.2, "shadows": 0.15, "whites": 0.05, "blacks": -0.05, "intensity": 1.0}"#;
    let suggestion = extract_suggestion(&envelope(reply)).unwrap();
    let outcome = apply_suggestion(&ColorParameters::NEUTRAL, &suggestion);
    assert_eq!(outcome.applied_count(), 9);

    let doc = LutDocument::generate(&outcome.params, CubeSize::new(17).unwrap()).unwrap();
    assert_eq!(doc.samples().len(), 4913);
    assert!(doc.samples().iter().all(|s| s.is_within_unit()));
}

#[test]
fn chatty_reply_with_out_of_range_values() {
    let reply = "Here is my estimate:\n```json\n{\"exposure\": 3.2, \"saturation\": \"1.4\", \"grain\": 0.3}\n```";
    let suggestion = extract_suggestion(&envelope(reply)).unwrap();
    let outcome = apply_suggestion(&ColorParameters::NEUTRAL, &suggestion);

    assert_eq!(outcome.params.exposure, 2.0);
    assert_eq!(outcome.params.saturation, 1.4);
    assert_eq!(outcome.clamped, vec![Parameter::Exposure]);
    assert_eq!(outcome.unknown, vec!["grain".to_string()]);
    assert!(LutDocument::generate(&outcome.params, CubeSize::new(2).unwrap()).is_ok());
}

#[test]
fn blocked_reply_leaves_parameters_alone() {
    let reply = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
    assert!(matches!(extract_suggestion(&reply), Err(AiError::Blocked(_))));
}

#[test]
fn saved_suggestion_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reply.json");
    std::fs::write(&path, envelope("{\"whites\": 0.2}").to_string()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let suggestion = parse_suggestion_source(&text).unwrap();
    let base = ColorParameters::NEUTRAL.with(Parameter::Contrast, 1.3);
    let outcome = apply_suggestion(&base, &suggestion);
    assert_eq!(outcome.params.whites, 0.2);
    assert_eq!(outcome.params.contrast, 1.3);
}

#[test]
fn request_body_names_every_parameter() {
    let body = SuggestionRequest::from_data_url("data:image/png;base64,iVBORw0KGgo=")
        .unwrap()
        .to_json()
        .unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    for p in Parameter::ALL {
        assert!(prompt.contains(p.name()));
    }
}
