//! 3D LUT generation, `.cube` serialization and read-back.

use std::fmt::{self, Write as _};
use std::io::{self, BufWriter, Write as _};
use std::path::Path;
use std::time::Instant;

use glam::DVec3;
use lutgen_core::preset::validate_title;
use lutgen_core::{ColorParameters, ColorSample, CubeSize};
use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ColorError;
use crate::pipeline::GradingPipeline;

/// Title written into generated `.cube` headers.
pub const DEFAULT_TITLE: &str = "Generated LUT via Web Tool (Google AI Assist)";

/// Bytes per data row: "0.000000 0.000000 0.000000\n".
const ROW_BYTES: usize = 27;

/// A 3D lookup table in `.cube` layout.
///
/// Samples are stored red-fastest, then green, then blue:
/// `index = r + g·N + b·N²`. Once built, a document is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct LutDocument {
    title: String,
    size: CubeSize,
    domain_min: [f64; 3],
    domain_max: [f64; 3],
    samples: Vec<ColorSample>,
}

impl LutDocument {
    /// Generate a LUT for `params` with the default title.
    pub fn generate(params: &ColorParameters, size: CubeSize) -> lutgen_core::Result<Self> {
        Self::generate_titled(params, size, DEFAULT_TITLE)
    }

    /// Generate a LUT for `params`.
    ///
    /// Parameters and title are validated before any node is evaluated; on
    /// error nothing is produced.
    pub fn generate_titled(
        params: &ColorParameters,
        size: CubeSize,
        title: &str,
    ) -> lutgen_core::Result<Self> {
        params.validate()?;
        validate_title(title)?;

        let started = Instant::now();
        let pipeline = GradingPipeline::new(params);
        let n = size.get();

        let mut samples = lattice(size);
        // One task per blue slice; chunks keep their position, so the
        // traversal order survives parallel evaluation.
        samples
            .par_chunks_mut(n * n)
            .for_each(|slice| pipeline.process_buffer(slice));

        info!(
            size = n,
            nodes = samples.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated 3D LUT"
        );

        Ok(Self {
            title: title.to_string(),
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            samples,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> CubeSize {
        self.size
    }

    pub fn domain_min(&self) -> [f64; 3] {
        self.domain_min
    }

    pub fn domain_max(&self) -> [f64; 3] {
        self.domain_max
    }

    /// All samples in traversal order.
    pub fn samples(&self) -> &[ColorSample] {
        &self.samples
    }

    /// Sample at lattice node `(r, g, b)`.
    ///
    /// # Panics
    ///
    /// Panics if any index is not below the cube size.
    pub fn at(&self, r: usize, g: usize, b: usize) -> ColorSample {
        let n = self.size.get();
        assert!(r < n && g < n && b < n, "node ({r}, {g}, {b}) outside a {n}-point lattice");
        self.samples[r + g * n + b * n * n]
    }

    /// Filename offered for this LUT.
    pub fn suggested_filename(&self) -> String {
        self.size.suggested_filename()
    }

    /// Render the `.cube` text.
    pub fn to_cube_string(&self) -> String {
        let mut out = String::with_capacity(256 + self.samples.len() * ROW_BYTES);
        // Writing into a String cannot fail.
        let _ = write!(out, "{self}");
        out
    }

    /// Stream the `.cube` text into `writer`.
    pub fn write_cube<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Write the `.cube` text to `path`.
    ///
    /// The text goes to a temporary file in the same directory, which then
    /// replaces `path`. A failed write leaves `path` untouched.
    pub fn save_cube(&self, path: &Path) -> Result<(), ColorError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        self.write_cube(BufWriter::new(staged.as_file_mut()))?;
        staged.persist(path).map_err(|e| e.error)?;
        debug!(path = %path.display(), "Saved .cube file");
        Ok(())
    }

    /// Parse `.cube` text containing a 3D LUT.
    pub fn from_cube(content: &str) -> Result<Self, ColorError> {
        let mut title = String::new();
        let mut size = None;
        let mut domain_min = [0.0; 3];
        let mut domain_max = [1.0; 3];
        let mut samples = Vec::new();

        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(rest) = line.strip_prefix("TITLE") {
                title = rest.trim().trim_matches('"').to_string();
                continue;
            }
            if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
                let n: usize = rest.trim().parse().map_err(|_| ColorError::Parse {
                    line: line_no,
                    message: format!("bad LUT_3D_SIZE: {:?}", rest.trim()),
                })?;
                let n = CubeSize::new(n).map_err(|e| ColorError::InvalidLut(e.to_string()))?;
                samples.reserve(n.node_count());
                size = Some(n);
                continue;
            }
            if line.starts_with("LUT_1D_SIZE") {
                return Err(ColorError::InvalidLut("expected 3D LUT, got 1D".into()));
            }
            if let Some(rest) = line.strip_prefix("DOMAIN_MIN") {
                domain_min = parse_triple(rest, line_no)?;
                continue;
            }
            if let Some(rest) = line.strip_prefix("DOMAIN_MAX") {
                domain_max = parse_triple(rest, line_no)?;
                continue;
            }
            if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                debug!(line = line_no, keyword = line, "Ignoring unsupported .cube keyword");
                continue;
            }

            samples.push(ColorSample::from(parse_triple(line, line_no)?));
        }

        let size = size.ok_or_else(|| ColorError::InvalidLut("missing LUT_3D_SIZE".into()))?;
        let expected = size.node_count();
        if samples.len() != expected {
            return Err(ColorError::DimensionMismatch {
                expected,
                got: samples.len(),
            });
        }

        Ok(Self {
            title,
            size,
            domain_min,
            domain_max,
            samples,
        })
    }

    /// Look up a sample using trilinear interpolation.
    ///
    /// Inputs outside the domain are clamped to its edges.
    pub fn lookup(&self, s: ColorSample) -> ColorSample {
        let n = self.size.get();
        let min = DVec3::from_array(self.domain_min);
        let range = DVec3::from_array(self.domain_max) - min;
        let input = DVec3::from_array(s.to_array());

        let t = DVec3::select(
            range.abs().cmplt(DVec3::splat(1e-10)),
            DVec3::ZERO,
            ((input - min) / range).clamp(DVec3::ZERO, DVec3::ONE),
        );
        let coords = t * (n - 1) as f64;

        let r0 = (coords.x as usize).min(n - 2);
        let g0 = (coords.y as usize).min(n - 2);
        let b0 = (coords.z as usize).min(n - 2);
        let frac = coords - DVec3::new(r0 as f64, g0 as f64, b0 as f64);

        let c = |r: usize, g: usize, b: usize| DVec3::from_array(self.at(r, g, b).to_array());

        let c00 = c(r0, g0, b0).lerp(c(r0 + 1, g0, b0), frac.x);
        let c10 = c(r0, g0 + 1, b0).lerp(c(r0 + 1, g0 + 1, b0), frac.x);
        let c01 = c(r0, g0, b0 + 1).lerp(c(r0 + 1, g0, b0 + 1), frac.x);
        let c11 = c(r0, g0 + 1, b0 + 1).lerp(c(r0 + 1, g0 + 1, b0 + 1), frac.x);
        let c0 = c00.lerp(c10, frac.y);
        let c1 = c01.lerp(c11, frac.y);

        ColorSample::from(c0.lerp(c1, frac.z).to_array())
    }
}

impl fmt::Display for LutDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [min_r, min_g, min_b] = self.domain_min;
        let [max_r, max_g, max_b] = self.domain_max;

        writeln!(f, "TITLE \"{}\"", self.title)?;
        writeln!(f, "LUT_3D_SIZE {}", self.size.get())?;
        writeln!(f, "DOMAIN_MIN {:?} {:?} {:?}", min_r, min_g, min_b)?;
        writeln!(f, "DOMAIN_MAX {:?} {:?} {:?}", max_r, max_g, max_b)?;
        writeln!(f)?;
        for s in &self.samples {
            writeln!(f, "{:.6} {:.6} {:.6}", s.r, s.g, s.b)?;
        }
        Ok(())
    }
}

/// Text artifact handed to a download or file-writing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LutArtifact {
    /// Suggested filename, e.g. `generated_lut_33x33.cube`.
    pub filename: String,
    /// Full `.cube` text.
    pub contents: String,
}

/// Validate a raw request and render the resulting `.cube` text.
pub fn generate_lut(params: &ColorParameters, size: usize) -> lutgen_core::Result<LutArtifact> {
    let size = CubeSize::new(size)?;
    let doc = LutDocument::generate(params, size)?;
    Ok(LutArtifact {
        filename: doc.suggested_filename(),
        contents: doc.to_cube_string(),
    })
}

/// Normalized lattice coordinates in traversal order: blue outermost,
/// then green, with red varying fastest.
pub fn lattice(size: CubeSize) -> Vec<ColorSample> {
    let n = size.get();
    let step = size.step();
    let mut nodes = Vec::with_capacity(size.node_count());
    for b in 0..n {
        for g in 0..n {
            for r in 0..n {
                nodes.push(ColorSample::new(
                    r as f64 * step,
                    g as f64 * step,
                    b as f64 * step,
                ));
            }
        }
    }
    nodes
}

fn parse_triple(text: &str, line: usize) -> Result<[f64; 3], ColorError> {
    let mut out = [0.0; 3];
    let mut parts = text.split_whitespace();
    for slot in out.iter_mut() {
        let part = parts.next().ok_or_else(|| ColorError::Parse {
            line,
            message: format!("expected 3 values in {:?}", text.trim()),
        })?;
        *slot = part.parse().map_err(|_| ColorError::Parse {
            line,
            message: format!("{:?} is not a number", part),
        })?;
    }
    if parts.next().is_some() {
        return Err(ColorError::Parse {
            line,
            message: format!("expected 3 values in {:?}", text.trim()),
        });
    }
    Ok(out)
}
