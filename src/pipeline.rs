//! Drives the full image-to-mosaic conversion: plan, resize, sweep, emit.

use image::DynamicImage;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::emit::{self, ColorPrecision, EmitOptions};
use crate::grid::{self, GridSpec, PlanError};
use crate::sample;

#[derive(Debug, Clone)]
pub struct MosaicConfig {
    /// Image height in comment nodes; the width follows the aspect ratio.
    pub rows: u32,
    pub track_alpha: bool,
    pub precision: ColorPrecision,
    /// Reuse the horizontal cell size vertically, as the historical tool did.
    pub legacy_step: bool,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            rows: 90,
            track_alpha: true,
            precision: ColorPrecision::default(),
            legacy_step: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("grid planning failed: {0}")]
    Plan(#[from] PlanError),
}

/// Receives progress notifications during the sweep. Passed in rather than
/// printed directly so the library stays console-free.
pub trait ProgressSink {
    fn report(&mut self, percent: f32);
}

/// Drops progress on the floor.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _percent: f32) {}
}

/// Finished conversion: the paste buffer plus counts for reporting.
pub struct Mosaic {
    pub spec: GridSpec,
    pub text: String,
    pub emitted: u64,
}

/// A planned conversion, ready to sweep. Splitting planning from rendering
/// lets callers print the grid summary before progress output starts.
pub struct Pipeline {
    spec: GridSpec,
    working: RgbaImage,
    opts: EmitOptions,
}

impl Pipeline {
    pub fn new(img: &DynamicImage, config: &MosaicConfig) -> Result<Self, MosaicError> {
        let spec = grid::plan(img.width(), img.height(), config.rows, config.legacy_step)?;

        let source = img.to_rgba8();
        let working = if (source.width(), source.height())
            == (spec.working_width, spec.working_height)
        {
            source
        } else {
            imageops::resize(
                &source,
                spec.working_width,
                spec.working_height,
                FilterType::Triangle,
            )
        };

        Ok(Self {
            spec,
            working,
            opts: EmitOptions {
                track_alpha: config.track_alpha,
                precision: config.precision,
            },
        })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Sweeps the grid row-major (y outer) and concatenates every emitted
    /// node block. Progress fires after each decile of cells; grids under
    /// ten cells report nothing.
    pub fn render(&self, progress: &mut dyn ProgressSink) -> Mosaic {
        let total = self.spec.total();
        let stride = total / 10;

        let mut text = String::new();
        let mut emitted = 0u64;
        let mut visited = 0u64;

        for y in 0..self.spec.rows {
            for x in 0..self.spec.cols {
                visited += 1;
                if stride > 0 && visited % stride == 0 {
                    progress.report(visited as f32 / total as f32 * 100.0);
                }

                let color =
                    sample::average_tile(&self.working, &self.spec, x, y, self.opts.track_alpha);
                if let Some(node) = emit::emit_node(color, x, y, &self.opts) {
                    text.push_str(&node);
                    emitted += 1;
                }
            }
        }

        Mosaic {
            spec: self.spec.clone(),
            text,
            emitted,
        }
    }
}

/// One-shot conversion for callers that do not need the planned spec early.
pub fn run(
    img: &DynamicImage,
    config: &MosaicConfig,
    progress: &mut dyn ProgressSink,
) -> Result<Mosaic, MosaicError> {
    Ok(Pipeline::new(img, config)?.render(progress))
}
