//! Integration tests for LUT generation and the `.cube` text format.
//!
//! Exercises lutgen-core parameters through the lutgen-color pipeline down
//! to the serialized text.

use lutgen_color::{generate_lut, transform, LutDocument};
use lutgen_core::{ColorParameters, ColorSample, CubeSize, LutgenError, Parameter};
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────

const HEADER_LINES: usize = 5;

fn graded() -> ColorParameters {
    ColorParameters {
        contrast: 1.15,
        saturation: 1.3,
        temperature: 0.1,
        exposure: -0.1,
        highlights: -0.2,
        shadows: 0.15,
        whites: 0.05,
        blacks: -0.05,
        intensity: 1.0,
    }
}

fn data_rows(text: &str) -> Vec<ColorSample> {
    text.lines()
        .skip(HEADER_LINES)
        .map(|line| {
            let v: Vec<f64> = line
                .split_whitespace()
                .map(|x| x.parse().unwrap())
                .collect();
            assert_eq!(v.len(), 3, "row {line:?}");
            ColorSample::new(v[0], v[1], v[2])
        })
        .collect()
}

// ── Layout ─────────────────────────────────────────────────────

#[test]
fn header_then_blank_line() {
    let artifact = generate_lut(&graded(), 17).unwrap();
    let lines: Vec<&str> = artifact.contents.lines().take(HEADER_LINES).collect();
    assert_eq!(
        lines,
        [
            "TITLE \"Generated LUT via Web Tool (Google AI Assist)\"",
            "LUT_3D_SIZE 17",
            "DOMAIN_MIN 0.0 0.0 0.0",
            "DOMAIN_MAX 1.0 1.0 1.0",
            "",
        ]
    );
    assert_eq!(artifact.filename, "generated_lut_17x17.cube");
}

#[test]
fn record_counts() {
    for (n, expected) in [(2, 8), (17, 4913)] {
        let artifact = generate_lut(&graded(), n).unwrap();
        assert_eq!(data_rows(&artifact.contents).len(), expected);
        assert!(artifact.contents.ends_with('\n'));
    }
}

#[test]
fn rows_have_six_decimals() {
    let artifact = generate_lut(&graded(), 5).unwrap();
    for line in artifact.contents.lines().skip(HEADER_LINES) {
        for value in line.split(' ') {
            let (_, frac) = value.split_once('.').unwrap();
            assert_eq!(frac.len(), 6, "{line:?}");
        }
    }
}

#[test]
fn first_and_last_records_follow_traversal() {
    let params = graded();
    let rows = data_rows(&generate_lut(&params, 33).unwrap().contents);

    let first = transform(ColorSample::BLACK, &params).clamp_unit();
    let last = transform(ColorSample::WHITE, &params).clamp_unit();
    assert!(rows[0].max_abs_diff(first) <= 5e-7);
    assert!(rows[rows.len() - 1].max_abs_diff(last) <= 5e-7);
}

#[test]
fn red_varies_fastest() {
    let rows = data_rows(&generate_lut(&ColorParameters::NEUTRAL, 3).unwrap().contents);
    assert_eq!(rows[1], ColorSample::new(0.5, 0.0, 0.0));
    assert_eq!(rows[3], ColorSample::new(0.0, 0.5, 0.0));
    assert_eq!(rows[9], ColorSample::new(0.0, 0.0, 0.5));
}

// ── Invariants ─────────────────────────────────────────────────

#[test]
fn neutral_is_identity_at_every_node() {
    let size = CubeSize::new(17).unwrap();
    let doc = LutDocument::generate(&ColorParameters::NEUTRAL, size).unwrap();
    for (node, out) in lutgen_color::lattice(size).iter().zip(doc.samples()) {
        assert!(out.max_abs_diff(*node) < 1e-6, "{node:?} -> {out:?}");
    }
}

#[test]
fn degenerate_remap_is_mid_gray_everywhere() {
    let params = ColorParameters::NEUTRAL
        .with(Parameter::Blacks, 1.0)
        .with(Parameter::Whites, -1.0)
        .with(Parameter::Contrast, 1.4);
    let artifact = generate_lut(&params, 5).unwrap();
    for line in artifact.contents.lines().skip(HEADER_LINES) {
        assert_eq!(line, "0.500000 0.500000 0.500000");
    }
}

#[test]
fn extreme_parameters_stay_in_unit_range() {
    let params = ColorParameters::NEUTRAL
        .with(Parameter::Exposure, 2.0)
        .with(Parameter::Contrast, 1.5)
        .with(Parameter::Saturation, 2.0)
        .with(Parameter::Temperature, -1.0)
        .with(Parameter::Blacks, 0.5)
        .with(Parameter::Whites, -0.5)
        .with(Parameter::Intensity, 1.5);
    let artifact = generate_lut(&params, 9).unwrap();
    for line in artifact.contents.lines().skip(HEADER_LINES) {
        assert!(!line.contains('-'), "negative value in {line:?}");
    }
    for row in data_rows(&artifact.contents) {
        assert!(row.is_within_unit(), "{row:?}");
    }
}

#[test]
fn out_of_range_finite_values_are_accepted() {
    let params = ColorParameters::NEUTRAL.with(Parameter::Exposure, 1000.0);
    let rows = data_rows(&generate_lut(&params, 2).unwrap().contents);
    assert_eq!(rows[0], ColorSample::BLACK);
    assert_eq!(rows[7], ColorSample::WHITE);
}

// ── Rejection ──────────────────────────────────────────────────

#[test]
fn rejects_sizes_below_two() {
    for n in [0, 1] {
        assert!(matches!(
            generate_lut(&ColorParameters::NEUTRAL, n),
            Err(LutgenError::InvalidCubeSize { size }) if size == n
        ));
    }
}

#[test]
fn rejects_non_finite_parameters() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let params = ColorParameters::NEUTRAL.with(Parameter::Highlights, bad);
        assert!(matches!(
            generate_lut(&params, 17),
            Err(LutgenError::NonFiniteParameter {
                parameter: Parameter::Highlights,
                ..
            })
        ));
    }
}

// ── Files ──────────────────────────────────────────────────────

#[test]
fn saved_cube_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let doc = LutDocument::generate(&graded(), CubeSize::new(17).unwrap()).unwrap();
    let path = dir.path().join(doc.suggested_filename());
    doc.save_cube(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let loaded = LutDocument::from_cube(&text).unwrap();
    assert_eq!(loaded.size(), doc.size());
    assert_eq!(loaded.title(), doc.title());
    for (a, b) in loaded.samples().iter().zip(doc.samples()) {
        assert!(a.max_abs_diff(*b) < 1e-6);
    }
}

#[test]
fn lookup_between_nodes_tracks_transform() {
    let params = graded();
    let doc = LutDocument::generate(&params, CubeSize::new(65).unwrap()).unwrap();
    let probe = ColorSample::new(0.41, 0.57, 0.23);
    let direct = transform(probe, &params).clamp_unit();
    assert!(doc.lookup(probe).max_abs_diff(direct) < 5e-3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_record_in_unit_range(
        exposure in -2.0..=2.0f64,
        contrast in 0.5..=1.5f64,
        saturation in 0.0..=2.0f64,
        shadows in -1.0..=1.0f64,
    ) {
        let params = ColorParameters {
            exposure,
            contrast,
            saturation,
            shadows,
            ..ColorParameters::NEUTRAL
        };
        let doc = LutDocument::generate(&params, CubeSize::new(5).unwrap()).unwrap();
        prop_assert!(doc.samples().iter().all(|s| s.is_within_unit()));
    }
}
