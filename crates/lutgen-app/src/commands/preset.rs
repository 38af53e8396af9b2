//! `lutgen preset`

use anyhow::{Context, Result};
use lutgen_core::{ColorParameters, Preset, PresetFile};
use tracing::info;

use super::apply_overrides;
use crate::PresetArgs;

pub fn run(args: PresetArgs) -> Result<()> {
    let mut preset = Preset::new(
        apply_overrides(ColorParameters::NEUTRAL, &args.set),
        args.size.unwrap_or_default(),
    );
    preset.title = args.title;
    preset.validate().context("Invalid preset")?;

    PresetFile::new(preset)
        .save_to_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "Wrote preset");
    Ok(())
}
