//! `lutgen generate`

use std::fs;

use anyhow::{Context, Result};
use lutgen_ai::{apply_suggestion, parse_suggestion_source};
use lutgen_color::{LutDocument, DEFAULT_TITLE};
use lutgen_core::{ColorParameters, CubeSize, PresetFile};
use tracing::{info, warn};

use super::apply_overrides;
use crate::GenerateArgs;

pub fn run(args: GenerateArgs) -> Result<()> {
    let (mut params, mut size, mut title) = match &args.preset {
        Some(path) => {
            let file = PresetFile::load_from_file(path)
                .with_context(|| format!("Failed to load preset {}", path.display()))?;
            info!(path = %path.display(), "Loaded preset");
            (file.preset.params, file.preset.size, file.preset.title)
        }
        None => (ColorParameters::NEUTRAL, CubeSize::DEFAULT, None),
    };

    if let Some(path) = &args.suggestion {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read suggestion {}", path.display()))?;
        let suggestion = parse_suggestion_source(&text)
            .with_context(|| format!("Failed to parse suggestion {}", path.display()))?;
        let outcome = apply_suggestion(&params, &suggestion);
        if outcome.is_empty() {
            warn!(path = %path.display(), "Suggestion contained no usable values");
        }
        params = outcome.params;
    }

    params = apply_overrides(params, &args.set);
    if let Some(requested) = args.size {
        size = requested;
    }
    if args.title.is_some() {
        title = args.title;
    }

    let title = title.as_deref().unwrap_or(DEFAULT_TITLE);
    let doc = LutDocument::generate_titled(&params, size, title)
        .context("Failed to generate LUT")?;

    let output = args.output.unwrap_or_else(|| doc.suggested_filename().into());
    doc.save_cube(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", output.display());
    Ok(())
}
