//! Preset files with versioning and migration.
//!
//! A preset captures one generation request: the grading parameters, the cube
//! size and an optional title. Presets are stored as JSON with a schema
//! version field for forward-compatible persistence.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cube_size::CubeSize;
use crate::error::{LutgenError, Result};
use crate::params::{ColorParameters, Parameter};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// A saved generation request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preset {
    /// Grading parameters.
    #[serde(default)]
    pub params: ColorParameters,
    /// Requested cube size.
    #[serde(default)]
    pub size: CubeSize,
    /// Title written into the LUT header. `None` uses the default title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Preset {
    /// Create a preset from parameters and a size.
    pub fn new(params: ColorParameters, size: CubeSize) -> Self {
        Self {
            params,
            size,
            title: None,
        }
    }

    /// Check the preset can drive a generation request.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }
}

/// Reject titles that would break the quoted `TITLE` header line.
pub fn validate_title(title: &str) -> Result<()> {
    if title.contains('"') {
        return Err(LutgenError::InvalidTitle(
            "title must not contain double quotes".into(),
        ));
    }
    if title.chars().any(char::is_control) {
        return Err(LutgenError::InvalidTitle(
            "title must not contain control characters".into(),
        ));
    }
    Ok(())
}

/// Versioned preset file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct PresetFile {
    /// Schema version for migration.
    pub version: u32,
    /// The preset data.
    pub preset: Preset,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl PresetFile {
    /// Create a new preset file from a preset.
    pub fn new(preset: Preset) -> Self {
        Self {
            version: CURRENT_VERSION,
            preset,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| LutgenError::Serialization(format!("Failed to serialize preset: {}", e)))
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| LutgenError::Serialization(format!("Invalid JSON: {}", e)))?;

        let version = schema_version(&raw)?;

        let migrated = migrate(raw, version)?;

        let file: Self = serde_json::from_value(migrated)
            .map_err(|e| LutgenError::Serialization(format!("Failed to parse preset: {}", e)))?;
        file.preset.validate()?;
        Ok(file)
    }

    /// Save preset to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load preset from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Read the `version` field. Files without one are v0.
fn schema_version(raw: &serde_json::Value) -> Result<u32> {
    let Some(value) = raw.get("version") else {
        return Ok(0);
    };
    let version = value.as_u64().ok_or_else(|| {
        LutgenError::Serialization(format!("Invalid preset version {}", value))
    })?;
    match u32::try_from(version) {
        Ok(v) if v <= CURRENT_VERSION => Ok(v),
        _ => Err(LutgenError::Serialization(format!(
            "Preset file version {} is newer than supported version {}",
            version, CURRENT_VERSION
        ))),
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        data = match version {
            0 => migrate_v0_to_v1(data)?,
            _ => {
                return Err(LutgenError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )))
            }
        };
        version += 1;
    }

    Ok(data)
}

/// v0 files are a bare parameter object, e.g. `{"contrast": 1.1, "exposure": 0.2}`.
///
/// Unknown keys are skipped with a warning; an object naming no parameter
/// at all is rejected.
fn migrate_v0_to_v1(data: serde_json::Value) -> Result<serde_json::Value> {
    let Some(object) = data.as_object() else {
        return Err(LutgenError::Serialization(
            "v0 preset must be a JSON object of parameters".into(),
        ));
    };

    let mut known = 0;
    for key in object.keys() {
        if Parameter::from_name(key).is_some() {
            known += 1;
        } else {
            warn!(key = %key, "Ignoring unknown key in v0 preset");
        }
    }
    if known == 0 {
        return Err(LutgenError::Serialization(
            "v0 preset names no grading parameter".into(),
        ));
    }
    debug!(parameters = known, "Migrating v0 parameter object to preset v1");
    Ok(serde_json::json!({
        "version": 1,
        "preset": { "params": data },
        "app_version": "unknown",
    }))
}
