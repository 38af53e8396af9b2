//! Integration tests for preset files feeding generation.

use lutgen_color::LutDocument;
use lutgen_core::{ColorParameters, CubeSize, Parameter, Preset, PresetFile};

#[test]
fn preset_file_to_cube() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teal.json");

    let mut preset = Preset::new(
        ColorParameters::NEUTRAL
            .with(Parameter::Temperature, -0.4)
            .with(Parameter::Saturation, 1.2),
        CubeSize::new(17).unwrap(),
    );
    preset.title = Some("Teal Night".into());
    PresetFile::new(preset).save_to_file(&path).unwrap();

    let loaded = PresetFile::load_from_file(&path).unwrap().preset;
    let doc = LutDocument::generate_titled(
        &loaded.params,
        loaded.size,
        loaded.title.as_deref().unwrap(),
    )
    .unwrap();
    let text = doc.to_cube_string();
    assert!(text.starts_with("TITLE \"Teal Night\"\nLUT_3D_SIZE 17\n"));
}

#[test]
fn legacy_parameter_object_generates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");
    std::fs::write(&path, r#"{"contrast": 1.15, "exposure": -0.1}"#).unwrap();

    let preset = PresetFile::load_from_file(&path).unwrap().preset;
    assert_eq!(preset.size, CubeSize::DEFAULT);
    let doc = LutDocument::generate(&preset.params, preset.size).unwrap();
    assert_eq!(doc.samples().len(), 33 * 33 * 33);
}

#[test]
fn preset_with_non_numeric_value_is_rejected() {
    let json = br#"{"version": 1, "preset": {"params": {"exposure": "NaN"}}, "app_version": "0.1.0"}"#;
    assert!(PresetFile::from_json(json).is_err());
}
