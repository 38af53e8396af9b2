//! `lutgen inspect`

use std::fs;

use anyhow::{bail, Context, Result};
use lutgen_color::LutDocument;
use lutgen_core::ColorSample;

use crate::InspectArgs;

/// Per-channel `(min, max)` over every sample.
pub fn channel_ranges(samples: &[ColorSample]) -> [(f64, f64); 3] {
    let mut ranges = [(f64::INFINITY, f64::NEG_INFINITY); 3];
    for s in samples {
        for (range, v) in ranges.iter_mut().zip(s.to_array()) {
            range.0 = range.0.min(v);
            range.1 = range.1.max(v);
        }
    }
    ranges
}

fn parse_rgb(text: &str) -> Result<ColorSample> {
    let values = text
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid R,G,B value: {text}"))?;
    match values.as_slice() {
        &[r, g, b] => Ok(ColorSample::new(r, g, b)),
        _ => bail!("Expected three comma-separated values, got {}", values.len()),
    }
}

pub fn run(args: InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let doc = LutDocument::from_cube(&text)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    println!("File:    {}", args.input.display());
    println!("Title:   {}", doc.title());
    println!("Size:    {}", doc.size());
    println!("Records: {}", doc.samples().len());
    for (name, (min, max)) in ["R", "G", "B"].iter().zip(channel_ranges(doc.samples())) {
        println!("{name}:       {min:.6} .. {max:.6}");
    }

    if let Some(lookup) = &args.lookup {
        let input = parse_rgb(lookup)?;
        let out = doc.lookup(input);
        println!(
            "Lookup:  ({:.6}, {:.6}, {:.6}) -> ({:.6}, {:.6}, {:.6})",
            input.r, input.g, input.b, out.r, out.g, out.b
        );
    }
    Ok(())
}
